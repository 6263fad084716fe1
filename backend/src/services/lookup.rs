//! TCE lookup orchestration.
//!
//! A lookup fetches the requested sources for one TIC, sorts whatever came
//! back and keeps per-source failures next to the successes, so a broken
//! TESS-SPOC database never hides the SPOC results (or the other way round).

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::db::repository::{RepositoryError, RepositoryResult, TceRepository};
use crate::models::{SpocTce, TessSpocTce, TicId};
use crate::services::ordering::sort_tces;

/// Which DV pipelines a lookup covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pipeline {
    /// SPOC (2-min cadence) only
    Spoc,
    /// TESS-SPOC (FFI) only
    TessSpoc,
    #[default]
    Both,
}

impl Pipeline {
    /// Parse the `pipeline` query value. Absent or unrecognized values select
    /// both pipelines.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("spoc") => Pipeline::Spoc,
            Some("tess_spoc") => Pipeline::TessSpoc,
            _ => Pipeline::Both,
        }
    }

    pub fn includes_spoc(&self) -> bool {
        matches!(self, Pipeline::Spoc | Pipeline::Both)
    }

    pub fn includes_tess_spoc(&self) -> bool {
        matches!(self, Pipeline::TessSpoc | Pipeline::Both)
    }
}

/// Result of looking up one TIC.
///
/// A source that was not requested is `None`; a requested source holds either
/// its sorted TCEs or the error that aborted its fetch.
#[derive(Debug)]
pub struct TceLookup {
    pub tic: TicId,
    pub pipeline: Pipeline,
    pub spoc: Option<RepositoryResult<Vec<SpocTce>>>,
    pub tess_spoc: Option<RepositoryResult<Vec<TessSpocTce>>>,
}

fn count<T>(source: &Option<RepositoryResult<Vec<T>>>) -> usize {
    match source {
        Some(Ok(records)) => records.len(),
        _ => 0,
    }
}

fn failure<T>(source: &Option<RepositoryResult<Vec<T>>>) -> Option<&RepositoryError> {
    match source {
        Some(Err(e)) => Some(e),
        _ => None,
    }
}

impl TceLookup {
    pub fn spoc_count(&self) -> usize {
        count(&self.spoc)
    }

    pub fn tess_spoc_count(&self) -> usize {
        count(&self.tess_spoc)
    }

    pub fn total_count(&self) -> usize {
        self.spoc_count() + self.tess_spoc_count()
    }

    pub fn spoc_error(&self) -> Option<&RepositoryError> {
        failure(&self.spoc)
    }

    pub fn tess_spoc_error(&self) -> Option<&RepositoryError> {
        failure(&self.tess_spoc)
    }

    /// The error to report when no requested source produced a result.
    pub fn total_failure(&self) -> Option<&RepositoryError> {
        let spoc_ok = matches!(self.spoc, Some(Ok(_)));
        let tess_spoc_ok = matches!(self.tess_spoc, Some(Ok(_)));
        if spoc_ok || tess_spoc_ok {
            return None;
        }
        self.spoc_error().or_else(|| self.tess_spoc_error())
    }

    /// Keep the lookup if any requested source answered, otherwise give up
    /// its first failure.
    pub fn into_result(self) -> Result<Self, RepositoryError> {
        if self.total_failure().is_none() {
            return Ok(self);
        }
        match (self.spoc, self.tess_spoc) {
            (Some(Err(e)), _) | (_, Some(Err(e))) => Err(e),
            (spoc, tess_spoc) => Ok(Self {
                tic: self.tic,
                pipeline: self.pipeline,
                spoc,
                tess_spoc,
            }),
        }
    }
}

async fn fetch_spoc(repo: &dyn TceRepository, tic: TicId) -> RepositoryResult<Vec<SpocTce>> {
    let mut records = repo.fetch_spoc_tces(tic).await?;
    sort_tces(&mut records);
    Ok(records)
}

async fn fetch_tess_spoc(
    repo: &dyn TceRepository,
    tic: TicId,
) -> RepositoryResult<Vec<TessSpocTce>> {
    let mut records = repo.fetch_tess_spoc_tces(tic).await?;
    sort_tces(&mut records);
    Ok(records)
}

/// Look up the TCEs of `tic` in the selected pipelines.
///
/// Sources are queried concurrently and independently; a failing source is
/// logged and recorded in the returned [`TceLookup`].
pub async fn lookup_tces(repo: &dyn TceRepository, tic: TicId, pipeline: Pipeline) -> TceLookup {
    let spoc_fut = async {
        if pipeline.includes_spoc() {
            Some(fetch_spoc(repo, tic).await)
        } else {
            None
        }
    };
    let tess_spoc_fut = async {
        if pipeline.includes_tess_spoc() {
            Some(fetch_tess_spoc(repo, tic).await)
        } else {
            None
        }
    };
    let (spoc, tess_spoc) = tokio::join!(spoc_fut, tess_spoc_fut);

    let lookup = TceLookup {
        tic,
        pipeline,
        spoc,
        tess_spoc,
    };

    if let Some(e) = lookup.spoc_error() {
        warn!(tic = %tic, error = %e, "SPOC query failed");
    }
    if let Some(e) = lookup.tess_spoc_error() {
        warn!(tic = %tic, error = %e, "TESS-SPOC query failed");
    }
    info!(
        "TIC {}: found {} SPOC TCEs, {} TESS-SPOC TCEs",
        tic,
        lookup.spoc_count(),
        lookup.tess_spoc_count()
    );
    lookup
}
