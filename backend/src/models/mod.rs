pub mod ids;
pub mod macros;
pub mod sectors;
pub mod tce;

pub use ids::*;
pub use sectors::*;
pub use tce::*;
