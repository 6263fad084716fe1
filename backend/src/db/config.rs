//! Database location configuration.
//!
//! The two TCE databases are built out-of-band by the ingestion scripts and
//! dropped into one data directory. This module resolves where that directory
//! is, either from a TOML file or from environment variables, and hands the
//! result to the repository as a plain value.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::repository::RepositoryError;

/// Data directory relative to the base path.
pub const DATA_DIR_NAME: &str = "data/tess_dv_fast";
/// SPOC TCE database filename.
pub const SPOC_DB_NAME: &str = "tess_tcestats.db";
/// TESS-SPOC TCE database filename.
pub const TESS_SPOC_DB_NAME: &str = "tess_spoc_tcestats.db";

/// Environment variable overriding the base path.
pub const BASE_PATH_ENV: &str = "TESS_DB_BASE_PATH";
/// Environment variable pointing at a TOML configuration file.
pub const CONFIG_FILE_ENV: &str = "TESS_DV_CONFIG";

/// Where the TCE databases live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Directory holding both database files
    pub data_dir: PathBuf,
    #[serde(default = "default_spoc_db_name")]
    pub spoc_db_name: String,
    #[serde(default = "default_tess_spoc_db_name")]
    pub tess_spoc_db_name: String,
}

/// TOML file layout: a single `[database]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    database: DatabaseConfig,
}

fn default_spoc_db_name() -> String {
    SPOC_DB_NAME.to_string()
}

fn default_tess_spoc_db_name() -> String {
    TESS_SPOC_DB_NAME.to_string()
}

impl DatabaseConfig {
    /// Use `data_dir` directly, with the default database filenames.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            spoc_db_name: default_spoc_db_name(),
            tess_spoc_db_name: default_tess_spoc_db_name(),
        }
    }

    /// Use `<base_path>/data/tess_dv_fast` as the data directory.
    pub fn with_base_path(base_path: impl AsRef<Path>) -> Self {
        Self::new(base_path.as_ref().join(DATA_DIR_NAME))
    }

    /// Resolve from the environment.
    ///
    /// # Environment Variables
    /// - `TESS_DB_BASE_PATH` (optional): base path; defaults to the directory
    ///   of the running executable, or `.` if that cannot be determined.
    pub fn from_env() -> Self {
        let base = env::var(BASE_PATH_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(executable_dir);
        Self::with_base_path(base)
    }

    /// Load from a TOML file with a `[database]` table.
    ///
    /// ```toml
    /// [database]
    /// data_dir = "/srv/tess/data/tess_dv_fast"
    /// spoc_db_name = "tess_tcestats.db"   # optional
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RepositoryError> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })?;
        Ok(file.database)
    }

    /// `TESS_DV_CONFIG` file if set, the environment otherwise.
    pub fn resolve() -> Result<Self, RepositoryError> {
        match env::var(CONFIG_FILE_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path),
            _ => Ok(Self::from_env()),
        }
    }

    pub fn spoc_db_path(&self) -> PathBuf {
        self.data_dir.join(&self.spoc_db_name)
    }

    pub fn tess_spoc_db_path(&self) -> PathBuf {
        self.data_dir.join(&self.tess_spoc_db_name)
    }
}

/// Directory of the running executable, falling back to the working directory.
pub fn executable_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
