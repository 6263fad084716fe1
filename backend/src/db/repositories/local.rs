//! In-memory TCE repository for tests and local development.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::db::repository::{RepositoryError, RepositoryResult, TceRepository};
use crate::models::{DetectionRecord, SpocTce, TessSpocTce, TicId};

#[derive(Debug, Default)]
struct LocalData {
    spoc: Vec<SpocTce>,
    tess_spoc: Vec<TessSpocTce>,
    spoc_failure: Option<String>,
    tess_spoc_failure: Option<String>,
}

/// Repository holding TCEs in memory.
///
/// Either source can be switched into a failing state to exercise the
/// partial-failure paths of the lookup service.
#[derive(Debug, Default)]
pub struct LocalRepository {
    data: RwLock<LocalData>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_spoc(&self, tce: SpocTce) {
        self.data.write().spoc.push(tce);
    }

    pub fn insert_tess_spoc(&self, tce: TessSpocTce) {
        self.data.write().tess_spoc.push(tce);
    }

    /// Make SPOC lookups fail with a backend-unavailable error.
    pub fn fail_spoc(&self, message: impl Into<String>) {
        self.data.write().spoc_failure = Some(message.into());
    }

    /// Make TESS-SPOC lookups fail with a backend-unavailable error.
    pub fn fail_tess_spoc(&self, message: impl Into<String>) {
        self.data.write().tess_spoc_failure = Some(message.into());
    }
}

fn matching<T: DetectionRecord + Clone>(records: &[T], tic: TicId) -> Vec<T> {
    records
        .iter()
        .filter(|r| r.tic_id() == tic)
        .cloned()
        .collect()
}

#[async_trait]
impl TceRepository for LocalRepository {
    async fn fetch_spoc_tces(&self, tic: TicId) -> RepositoryResult<Vec<SpocTce>> {
        let data = self.data.read();
        if let Some(msg) = &data.spoc_failure {
            return Err(RepositoryError::unavailable(msg.clone()));
        }
        Ok(matching(&data.spoc, tic))
    }

    async fn fetch_tess_spoc_tces(&self, tic: TicId) -> RepositoryResult<Vec<TessSpocTce>> {
        let data = self.data.read();
        if let Some(msg) = &data.tess_spoc_failure {
            return Err(RepositoryError::unavailable(msg.clone()));
        }
        Ok(matching(&data.tess_spoc, tic))
    }

    async fn health_check(&self) -> RepositoryResult<(bool, bool)> {
        let data = self.data.read();
        Ok((data.spoc_failure.is_none(), data.tess_spoc_failure.is_none()))
    }
}
