//! Service layer between the repositories and the HTTP handlers.
//!
//! Services orchestrate repository calls (one fetch per pipeline), put the
//! results into their display order and provide the static release metadata
//! shown on the home page.

pub mod lookup;
pub mod ordering;
pub mod watermarks;

pub use lookup::{lookup_tces, Pipeline, TceLookup};
pub use ordering::{compare_tces, sort_tces};
pub use watermarks::HighWatermarks;
