#![allow(dead_code)]

use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};
use tempfile::TempDir;
use tess_dv_fast::db::DatabaseConfig;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub const SPOC_SCHEMA: &str = "CREATE TABLE tess_tcestats (
    ticid INTEGER,
    exomast_id TEXT,
    sectors TEXT,
    tce_plnt_num INTEGER,
    dvs TEXT,
    dvm TEXT,
    dvr TEXT,
    tce_period REAL,
    tce_time0bt REAL,
    tce_duration REAL,
    tce_depth REAL,
    tce_prad REAL,
    tce_impact REAL,
    tce_ditco_msky REAL,
    tce_ditco_msky_err REAL,
    tce_dicco_msky REAL,
    tce_dicco_msky_err REAL,
    tce_sradius_prov_is_solar INTEGER
)";

pub const TESS_SPOC_SCHEMA: &str = "CREATE TABLE tess_spoc_tcestats (
    ticid INTEGER,
    sectors TEXT,
    tce_plnt_num INTEGER
)";

/// A SPOC row as stored in the database.
#[derive(Debug, Clone)]
pub struct SpocRow {
    pub tic: i64,
    pub sectors: &'static str,
    pub planet: i64,
    pub period: Option<f64>,
    pub depth_ppm: Option<f64>,
    pub tic_offset: (f64, f64),
    pub solar_radius: bool,
}

impl SpocRow {
    pub fn new(tic: i64, sectors: &'static str, planet: i64) -> Self {
        Self {
            tic,
            sectors,
            planet,
            period: Some(6.267901),
            depth_ppm: Some(1234.0),
            tic_offset: (12.3, 4.1),
            solar_radius: false,
        }
    }

    pub fn exomast_id(&self) -> String {
        format!(
            "TIC{}{}TCE{}",
            self.tic,
            self.sectors.replace('-', "").to_uppercase(),
            self.planet
        )
    }
}

pub fn create_spoc_db(path: &Path, rows: &[SpocRow]) {
    let conn = Connection::open(path).unwrap();
    conn.execute(SPOC_SCHEMA, []).unwrap();
    for row in rows {
        let prefix = format!("tess2018206190142-{}-{:016}", row.sectors, row.tic);
        conn.execute(
            "INSERT INTO tess_tcestats VALUES
             (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1325.5046, 1.52, ?9, 11.2, 0.12, ?10, ?11, 0.0, -1.0, ?12)",
            params![
                row.tic,
                row.exomast_id(),
                row.sectors,
                row.planet,
                format!("{}-{:02}-00239_dvs.pdf", prefix, row.planet),
                format!("{}-00239_dvm.pdf", prefix),
                format!("{}-00239_dvr.pdf", prefix),
                row.period,
                row.depth_ppm,
                row.tic_offset.0,
                row.tic_offset.1,
                row.solar_radius,
            ],
        )
        .unwrap();
    }
}

pub fn create_tess_spoc_db(path: &Path, rows: &[(i64, &str, i64)]) {
    let conn = Connection::open(path).unwrap();
    conn.execute(TESS_SPOC_SCHEMA, []).unwrap();
    for (tic, sectors, planet) in rows {
        conn.execute(
            "INSERT INTO tess_spoc_tcestats VALUES (?1, ?2, ?3)",
            params![tic, sectors, planet],
        )
        .unwrap();
    }
}

/// Both databases in a temporary data directory.
pub struct Fixture {
    pub dir: TempDir,
    pub config: DatabaseConfig,
}

impl Fixture {
    /// Empty data directory; no database files yet.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig::new(dir.path());
        Self { dir, config }
    }

    pub fn with_data(spoc: &[SpocRow], tess_spoc: &[(i64, &str, i64)]) -> Self {
        let fixture = Self::empty();
        create_spoc_db(&fixture.config.spoc_db_path(), spoc);
        create_tess_spoc_db(&fixture.config.tess_spoc_db_path(), tess_spoc);
        fixture
    }

    /// Standard data set: TIC 33979459 with SPOC and TESS-SPOC TCEs, one of
    /// them found by both pipelines.
    pub fn standard() -> Self {
        Self::with_data(
            &[
                SpocRow::new(33979459, "s0061-s0061", 1),
                SpocRow::new(33979459, "s0001-s0069", 1),
                SpocRow::new(33979459, "s0061-s0061", 2),
                SpocRow::new(111, "s0001-s0001", 1),
            ],
            &[
                (33979459, "s0061-s0061", 1),
                (33979459, "s0056-s0069", 1),
                (222, "s0040-s0040", 1),
            ],
        )
    }
}
