//! Identifier and product-filename derivation, plus the MAST link templates.
//!
//! TESS-SPOC (FFI) TCE tables carry only `ticid`, `sectors` and `tce_plnt_num`.
//! Everything else a TCE row needs (its display id and its DV report
//! filenames) is derived here from those three values. The filenames follow
//! the HLSP naming scheme closely enough that they can be parsed back into
//! the TIC and sector range when building download links.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{PlanetNum, ProductKind, Sectors, TicId};

/// Download endpoint for SPOC (2-min cadence) DV products.
pub const SPOC_PRODUCT_URL_PREFIX: &str =
    "https://mast.stsci.edu/api/v0.1/Download/file/?uri=mast:TESS/product/";

/// Download endpoint root for TESS-SPOC HLSP products.
pub const TESS_SPOC_PRODUCT_URL_PREFIX: &str =
    "https://mast.stsci.edu/api/v0.1/Download/file/?uri=mast:HLSP/tess-spoc/";

/// ExoMAST planet page, keyed by the raw exomast id.
pub const EXOMAST_PLANET_URL_PREFIX: &str = "https://exo.mast.stsci.edu/exomast_planet.html?planet=";

/// Suffix marking an id as coming from the TESS-SPOC (FFI) source.
pub const TESS_SPOC_ID_SUFFIX: &str = "_f";

const TESS_SPOC_FILENAME_PREFIX: &str = "hlsp_tess-spoc_tess_phot_";
const TESS_SPOC_FILENAME_VERSION: &str = "tess_v1";

static TESS_SPOC_FILENAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"hlsp_tess-spoc_tess_phot_(?P<ticid>\d{16})-(?P<sectors>s\d+(?:-s\d+)?)_tess_v1_")
        .expect("valid regex")
});

static TIC_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"TIC\d+").expect("valid regex"));

/// Display id of a TESS-SPOC TCE, e.g. `TIC33979459S0056S0069TCE1_f`.
pub fn tess_spoc_id(tic: TicId, sectors: &Sectors, planet: PlanetNum) -> String {
    format!(
        "TIC{}{}TCE{}{}",
        tic,
        sectors.compact_upper(),
        planet,
        TESS_SPOC_ID_SUFFIX
    )
}

/// Map a TESS-SPOC id onto the SPOC id it would have, for duplicate detection.
///
/// Works on both the raw and the lower-cased short form
/// (`s0056s0069tce1_f` -> `s0056s0069tce1`).
pub fn spoc_equivalent_id(tess_spoc_id: &str) -> String {
    tess_spoc_id
        .replacen("_ftce", "_tce", 1)
        .replacen(TESS_SPOC_ID_SUFFIX, "", 1)
}

/// HLSP filename of one TESS-SPOC DV product.
///
/// Only the per-TCE summary (`dvs`) carries the planet number; the multi-TCE
/// summary (`dvm`) and the full report (`dvr`) are per target.
pub fn tess_spoc_product_filename(
    kind: ProductKind,
    tic: TicId,
    sectors: &Sectors,
    planet: PlanetNum,
) -> String {
    let planet_suffix = match kind {
        ProductKind::Dvs => format!("-{}", planet.zero_padded()),
        ProductKind::Dvm | ProductKind::Dvr => String::new(),
    };
    format!(
        "{}{}-{}_{}_{}{}.pdf",
        TESS_SPOC_FILENAME_PREFIX,
        tic.zero_padded(),
        sectors,
        TESS_SPOC_FILENAME_VERSION,
        kind.code(),
        planet_suffix
    )
}

/// TIC and sector range recovered from a TESS-SPOC product filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TessSpocFilenameParts {
    pub tic: TicId,
    pub sectors: Sectors,
}

/// Reverse of [`tess_spoc_product_filename`]. Returns `None` for anything
/// that does not follow the HLSP naming scheme.
pub fn parse_tess_spoc_filename(filename: &str) -> Option<TessSpocFilenameParts> {
    let caps = TESS_SPOC_FILENAME_RE.captures(filename)?;
    let tic: i64 = caps.name("ticid")?.as_str().parse().ok()?;
    if tic <= 0 {
        return None;
    }
    Some(TessSpocFilenameParts {
        tic: TicId(tic),
        sectors: Sectors::new(caps.name("sectors")?.as_str()),
    })
}

/// Download URL of a SPOC DV product.
pub fn spoc_product_url(filename: &str) -> String {
    format!("{}{}", SPOC_PRODUCT_URL_PREFIX, filename)
}

/// Download URL of a TESS-SPOC DV product.
///
/// The archive lays products out as `<sectors>/target/<t1>/<t2>/<t3>/<t4>/`
/// where `t1..t4` are the 4-digit groups of the zero-padded TIC, and a
/// single-sector run is filed under its one sector (`s0056`, not
/// `s0056-s0056`). Returns `None` if the filename cannot be parsed.
pub fn tess_spoc_product_url(filename: &str) -> Option<String> {
    let parts = parse_tess_spoc_filename(filename)?;
    let sectors_dir = match parts.sectors.as_str().split_once('-') {
        Some((start, end)) if start == end => start.to_string(),
        _ => parts.sectors.to_string(),
    };
    let padded = parts.tic.zero_padded();
    Some(format!(
        "{}{}/target/{}/{}/{}/{}/{}",
        TESS_SPOC_PRODUCT_URL_PREFIX,
        sectors_dir,
        &padded[0..4],
        &padded[4..8],
        &padded[8..12],
        &padded[12..16],
        filename
    ))
}

/// ExoMAST page for a SPOC TCE.
pub fn exomast_url(exomast_id: &str) -> String {
    format!("{}{}", EXOMAST_PLANET_URL_PREFIX, exomast_id)
}

/// Id without its `TIC<digits>` prefix, lower-cased (`TIC123S0001S0013TCE1` ->
/// `s0001s0013tce1`). This is the label shown in result tables.
pub fn short_label(id: &str) -> String {
    TIC_PREFIX_RE.replace_all(id, "").to_lowercase()
}

/// Link text for a product file: the token between the last `_` and the
/// extension, minus any `-NN` planet suffix (`..._dvs-01.pdf` -> `dvs`).
pub fn product_label(filename: &str) -> &str {
    let Some(idx) = filename.rfind('_') else {
        return filename;
    };
    let tail = &filename[idx + 1..];
    let token = match tail.find('.') {
        Some(dot) => &tail[..dot],
        None => return filename,
    };
    match token.rsplit_once('-') {
        Some((head, num)) if !num.is_empty() && num.bytes().all(|b| b.is_ascii_digit()) => head,
        _ => token,
    }
}
