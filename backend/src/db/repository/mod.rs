//! Repository trait for TCE lookups.

use async_trait::async_trait;

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use crate::models::{SpocTce, TessSpocTce, TicId};

/// Read-only access to the two TCE tables.
///
/// Results come back in storage order; callers sort them (see
/// [`crate::services::ordering`]). A TIC with no TCEs yields an empty vector.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to be shared across axum handlers.
#[async_trait]
pub trait TceRepository: Send + Sync {
    /// Fetch all SPOC (2-min cadence) TCEs of a TIC.
    async fn fetch_spoc_tces(&self, tic: TicId) -> RepositoryResult<Vec<SpocTce>>;

    /// Fetch all TESS-SPOC (FFI) TCEs of a TIC.
    async fn fetch_tess_spoc_tces(&self, tic: TicId) -> RepositoryResult<Vec<TessSpocTce>>;

    /// Whether each backing database can be opened, as `(spoc, tess_spoc)`.
    async fn health_check(&self) -> RepositoryResult<(bool, bool)>;
}
