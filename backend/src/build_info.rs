//! Build identification shown on the home page.
//!
//! The deploy step writes the commit SHA into `build.txt` next to the server
//! executable. It is read once at startup.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::warn;

use crate::db::config::executable_dir;

pub const BUILD_FILE_NAME: &str = "build.txt";

/// Number of characters shown for the abbreviated SHA.
const SHORT_SHA_LEN: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    sha: String,
}

impl BuildInfo {
    pub fn new(sha: impl Into<String>) -> Self {
        Self { sha: sha.into() }
    }

    /// First line of the file at `path`. A missing or unreadable file yields
    /// an empty `BuildInfo`.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::new(content.lines().next().unwrap_or("").trim()),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "build info not available");
                Self::default()
            }
        }
    }

    /// `build.txt` in the directory of the running executable.
    pub fn from_executable_dir() -> Self {
        Self::load(&executable_dir().join(BUILD_FILE_NAME))
    }

    pub fn sha(&self) -> &str {
        &self.sha
    }

    pub fn short_sha(&self) -> &str {
        match self.sha.char_indices().nth(SHORT_SHA_LEN) {
            Some((idx, _)) => &self.sha[..idx],
            None => &self.sha,
        }
    }
}
