//! Observing-sector descriptors such as `s0014-s0086` or `s0007`.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static SECTORS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^s(\d+)(?:-s(\d+))?$").expect("valid regex"));

/// Span reported for a descriptor that cannot be parsed.
pub const UNKNOWN_SECTOR_SPAN: i32 = -1;

/// Sector descriptor of a TCE, kept verbatim as stored in the database.
///
/// The raw form is what appears in identifiers and filenames, so it is never
/// normalized; parsing only happens on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sectors(String);

impl Sectors {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parsed `(start, end)` sector numbers. A single-sector descriptor is its
    /// own range.
    pub fn range(&self) -> Option<(u32, u32)> {
        let caps = SECTORS_RE.captures(&self.0)?;
        let start: u32 = caps.get(1)?.as_str().parse().ok()?;
        let end: u32 = match caps.get(2) {
            Some(m) => m.as_str().parse().ok()?,
            None => start,
        };
        Some((start, end))
    }

    /// Number of sectors covered, `end - start + 1`, or
    /// [`UNKNOWN_SECTOR_SPAN`] when the descriptor is malformed or the span
    /// does not fit in an `i32`.
    pub fn span(&self) -> i32 {
        self.range()
            .and_then(|(start, end)| i32::try_from(i64::from(end) - i64::from(start) + 1).ok())
            .unwrap_or(UNKNOWN_SECTOR_SPAN)
    }

    /// Descriptor with dashes removed and upper-cased, as embedded in TCE ids
    /// (`s0056-s0069` -> `S0056S0069`).
    pub fn compact_upper(&self) -> String {
        self.0.replace('-', "").to_uppercase()
    }
}

impl fmt::Display for Sectors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Sectors {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Sectors {
    fn from(s: String) -> Self {
        Self(s)
    }
}
