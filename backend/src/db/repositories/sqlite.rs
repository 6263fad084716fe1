//! SQLite-backed TCE repository.
//!
//! Each lookup opens its database read-only, runs one parameterized SELECT and
//! closes the handle again. The files are rebuilt by an external ingestion job
//! and may be read by many requests at once, so no connection is held between
//! calls and nothing here ever asks for a write lock.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rusqlite::{params, Connection, OpenFlags, Row};
use tracing::debug;

use crate::db::config::DatabaseConfig;
use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult, TceRepository};
use crate::models::{PlanetNum, Sectors, SpocMeasurements, SpocTce, TessSpocTce, TicId};
use crate::units::Offset;

pub const SPOC_TABLE: &str = "tess_tcestats";
pub const TESS_SPOC_TABLE: &str = "tess_spoc_tcestats";

const SPOC_QUERY: &str = "SELECT ticid, exomast_id, sectors, tce_plnt_num, dvs, dvm, dvr, \
     tce_period, tce_time0bt, tce_duration, tce_depth, tce_prad, tce_impact, \
     tce_ditco_msky, tce_ditco_msky_err, tce_dicco_msky, tce_dicco_msky_err, \
     tce_sradius_prov_is_solar \
     FROM tess_tcestats WHERE ticid = ?1";

const TESS_SPOC_QUERY: &str =
    "SELECT ticid, sectors, tce_plnt_num FROM tess_spoc_tcestats WHERE ticid = ?1";

/// Repository reading the SPOC and TESS-SPOC SQLite databases.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    config: DatabaseConfig,
}

impl SqliteRepository {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }
}

/// Open `path` strictly read-only. The file must already exist.
pub fn open_read_only(path: &Path) -> RepositoryResult<Connection> {
    if !path.is_file() {
        return Err(RepositoryError::unavailable(format!(
            "database file not found: {}",
            path.display()
        )));
    }
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| {
        RepositoryError::unavailable(format!("failed to open database {}: {}", path.display(), e))
    })
}

/// A missing column means the table was not built the way we read it; treat
/// it like any other malformed row rather than an outage.
fn prepare_error(err: rusqlite::Error) -> RepositoryError {
    if let rusqlite::Error::SqliteFailure(_, Some(ref msg)) = err {
        if msg.starts_with("no such column") {
            return RepositoryError::corrupt_record(format!("schema mismatch: {}", msg));
        }
    }
    err.into()
}

fn offset(value: Option<f64>, error: Option<f64>) -> Option<Offset> {
    Some(Offset::new(value?, error?))
}

fn positive_tic(row: &Row<'_>) -> RepositoryResult<TicId> {
    let tic: TicId = row.get(0)?;
    if tic.value() <= 0 {
        return Err(RepositoryError::corrupt_record(format!(
            "non-positive ticid {}",
            tic
        )));
    }
    Ok(tic)
}

fn spoc_from_row(row: &Row<'_>) -> RepositoryResult<SpocTce> {
    Ok(SpocTce {
        tic_id: positive_tic(row)?,
        exomast_id: row.get(1)?,
        sectors: Sectors::new(row.get::<_, String>(2)?),
        planet_num: row.get::<_, PlanetNum>(3)?,
        dvs: row.get(4)?,
        dvm: row.get(5)?,
        dvr: row.get(6)?,
        measurements: SpocMeasurements {
            period: row.get(7)?,
            epoch: row.get(8)?,
            duration: row.get(9)?,
            depth_ppm: row.get(10)?,
            planet_radius: row.get(11)?,
            impact: row.get(12)?,
            tic_offset: offset(row.get(13)?, row.get(14)?),
            oot_offset: offset(row.get(15)?, row.get(16)?),
            stellar_radius_is_solar: row.get::<_, Option<bool>>(17)?.unwrap_or(false),
        },
    })
}

fn tess_spoc_from_row(row: &Row<'_>) -> RepositoryResult<TessSpocTce> {
    Ok(TessSpocTce::new(
        positive_tic(row)?,
        Sectors::new(row.get::<_, String>(1)?),
        row.get::<_, PlanetNum>(2)?,
    ))
}

/// Run `sql` for `tic` and decode every row with `decode`, failing the whole
/// fetch on the first bad row.
fn query_by_tic<T>(
    path: &Path,
    sql: &str,
    tic: TicId,
    decode: fn(&Row<'_>) -> RepositoryResult<T>,
) -> RepositoryResult<Vec<T>> {
    let conn = open_read_only(path)?;
    let mut stmt = conn.prepare(sql).map_err(prepare_error)?;
    let mut rows = stmt.query(params![tic])?;

    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        records.push(decode(row)?);
    }
    Ok(records)
}

/// Blocking SPOC lookup against the database at `path`.
pub fn query_spoc_tces(path: &Path, tic: TicId) -> RepositoryResult<Vec<SpocTce>> {
    query_by_tic(path, SPOC_QUERY, tic, spoc_from_row)
}

/// Blocking TESS-SPOC lookup against the database at `path`.
pub fn query_tess_spoc_tces(path: &Path, tic: TicId) -> RepositoryResult<Vec<TessSpocTce>> {
    query_by_tic(path, TESS_SPOC_QUERY, tic, tess_spoc_from_row)
}

async fn run_blocking<T, F>(f: F) -> RepositoryResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> RepositoryResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| RepositoryError::internal(format!("Task join error: {}", e)))?
}

fn fetch_context(operation: &str, table: &str, tic: TicId) -> ErrorContext {
    ErrorContext::new(operation)
        .with_entity(table)
        .with_entity_id(tic)
}

fn can_open(path: PathBuf) -> bool {
    open_read_only(&path).is_ok()
}

#[async_trait]
impl TceRepository for SqliteRepository {
    async fn fetch_spoc_tces(&self, tic: TicId) -> RepositoryResult<Vec<SpocTce>> {
        let path = self.config.spoc_db_path();
        let records = run_blocking(move || query_spoc_tces(&path, tic))
            .await
            .map_err(|e| e.with_context(fetch_context("fetch_spoc_tces", SPOC_TABLE, tic)))?;
        debug!(tic = %tic, count = records.len(), "fetched SPOC TCEs");
        Ok(records)
    }

    async fn fetch_tess_spoc_tces(&self, tic: TicId) -> RepositoryResult<Vec<TessSpocTce>> {
        let path = self.config.tess_spoc_db_path();
        let records = run_blocking(move || query_tess_spoc_tces(&path, tic))
            .await
            .map_err(|e| {
                e.with_context(fetch_context("fetch_tess_spoc_tces", TESS_SPOC_TABLE, tic))
            })?;
        debug!(tic = %tic, count = records.len(), "fetched TESS-SPOC TCEs");
        Ok(records)
    }

    async fn health_check(&self) -> RepositoryResult<(bool, bool)> {
        let spoc = self.config.spoc_db_path();
        let tess_spoc = self.config.tess_spoc_db_path();
        run_blocking(move || Ok((can_open(spoc), can_open(tess_spoc)))).await
    }
}
