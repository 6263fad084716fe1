//! Latest data releases ("high watermarks") shown on the home page.
//!
//! The databases are built offline from MAST bulk-download files. Only the
//! newest source of each catalog is kept here; the sector tokens are pulled
//! out of those file names.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Newest SPOC single-sector TCE statistics file.
pub const SPOC_SINGLE_SECTOR_SOURCES: &[&str] = &[
    "https://archive.stsci.edu/missions/tess/catalogs/tce/tess2025258033922-s0097-s0097_dvr-tcestats.csv",
];

/// Newest SPOC multi-sector TCE statistics file.
pub const SPOC_MULTI_SECTOR_SOURCES: &[&str] = &[
    "https://archive.stsci.edu/missions/tess/catalogs/tce/tess2018206190142-s0001-s0092_dvr-tcestats.csv",
];

/// Newest TESS-SPOC single-sector DV download script.
pub const TESS_SPOC_SINGLE_SECTOR_SOURCES: &[&str] = &[
    "https://archive.stsci.edu/hlsps/tess-spoc/download_scripts/hlsp_tess-spoc_tess_phot_s0079_tess_v1_dl-dv.sh",
];

/// Newest TESS-SPOC multi-sector DV download script. The file is named
/// `s0056-s0069` although it covers sectors 36 through 69.
pub const TESS_SPOC_MULTI_SECTOR_SOURCES: &[&str] = &[
    "https://archive.stsci.edu/hlsps/tess-spoc/download_scripts/hlsp_tess-spoc_tess_phot_s0056-s0069_tess_v1_dl-dv.sh",
];

static SPOC_SINGLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(s\d+)_dvr-tcestats").expect("valid regex"));
static SPOC_MULTI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(s\d+-s\d+)_dvr-tcestats").expect("valid regex"));
static TESS_SPOC_SINGLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_(s\d+)_tess_v1_dl-dv").expect("valid regex"));
static TESS_SPOC_MULTI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_(s\d+-s\d+)_tess_v1_dl-dv").expect("valid regex"));

/// Latest sectors covered by each catalog. Empty when a source name does not
/// carry a recognizable sector token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighWatermarks {
    pub spoc_single_sector: String,
    pub spoc_multi_sector: String,
    pub tess_spoc_single_sector: String,
    pub tess_spoc_multi_sector: String,
}

/// First capture group of `re` in the last entry of `sources`.
fn latest_token(sources: &[&str], re: &Regex) -> String {
    sources
        .last()
        .and_then(|url| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

impl HighWatermarks {
    pub fn current() -> Self {
        Self {
            spoc_single_sector: latest_token(SPOC_SINGLE_SECTOR_SOURCES, &SPOC_SINGLE_RE),
            spoc_multi_sector: latest_token(SPOC_MULTI_SECTOR_SOURCES, &SPOC_MULTI_RE),
            tess_spoc_single_sector: latest_token(
                TESS_SPOC_SINGLE_SECTOR_SOURCES,
                &TESS_SPOC_SINGLE_RE,
            ),
            tess_spoc_multi_sector: latest_token(
                TESS_SPOC_MULTI_SECTOR_SOURCES,
                &TESS_SPOC_MULTI_RE,
            ),
        }
    }
}
