//! TCE (Threshold Crossing Event) records from the two DV pipelines.
//!
//! SPOC (2-min cadence) TCEs come with the full set of fitted parameters and
//! their own exomast ids and product filenames. TESS-SPOC (FFI) TCEs only
//! identify the event; their id and filenames are derived. Both shapes are
//! exposed through [`DetectionRecord`] so ordering and table assembly can
//! treat them alike.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::ids::{PlanetNum, TicId};
use super::sectors::Sectors;
use crate::derivation;
use crate::units::Offset;

/// Kinds of DV products published per TCE, in table-column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    /// Per-TCE summary
    Dvs,
    /// Multi-TCE summary
    Dvm,
    /// Full report
    Dvr,
}

impl ProductKind {
    pub const ALL: [ProductKind; 3] = [ProductKind::Dvs, ProductKind::Dvm, ProductKind::Dvr];

    pub fn code(&self) -> &'static str {
        match self {
            ProductKind::Dvs => "dvs",
            ProductKind::Dvm => "dvm",
            ProductKind::Dvr => "dvr",
        }
    }
}

/// A downloadable DV product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLink {
    pub kind: ProductKind,
    pub filename: String,
    pub url: String,
}

/// Common view over both TCE shapes.
pub trait DetectionRecord {
    fn tic_id(&self) -> TicId;

    fn planet_num(&self) -> PlanetNum;

    fn sectors(&self) -> &Sectors;

    /// Full identifier, e.g. `TIC261136679S0001S0013TCE1`.
    fn display_identifier(&self) -> Cow<'_, str>;

    /// Number of sectors the TCE covers; `-1` if the descriptor is malformed.
    fn sector_span(&self) -> i32 {
        self.sectors().span()
    }

    /// DV product links, in [`ProductKind::ALL`] order. Products whose
    /// filename is unknown are skipped.
    fn product_links(&self) -> Vec<ProductLink>;

    /// Short, lower-case label shown in tables (`s0001s0013tce1`).
    fn short_label(&self) -> String {
        derivation::short_label(&self.display_identifier())
    }
}

/// Fitted transit parameters of a SPOC TCE.
///
/// Columns may be NULL in the source table (e.g. a fit that did not
/// converge); those are kept as `None` and rendered blank, never as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpocMeasurements {
    /// Orbital period, days
    pub period: Option<f64>,
    /// Transit epoch, BTJD
    pub epoch: Option<f64>,
    /// Transit duration, hours
    pub duration: Option<f64>,
    /// Transit depth, ppm
    pub depth_ppm: Option<f64>,
    /// Planet radius, Earth radii
    pub planet_radius: Option<f64>,
    /// Impact parameter
    pub impact: Option<f64>,
    /// Offset from the TIC position (difference image), arcsec
    pub tic_offset: Option<Offset>,
    /// Offset from the out-of-transit centroid, arcsec
    pub oot_offset: Option<Offset>,
    /// Whether the stellar radius behind `planet_radius` is a solar default
    pub stellar_radius_is_solar: bool,
}

/// A TCE from the SPOC pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpocTce {
    pub tic_id: TicId,
    pub exomast_id: String,
    pub sectors: Sectors,
    pub planet_num: PlanetNum,
    pub dvs: Option<String>,
    pub dvm: Option<String>,
    pub dvr: Option<String>,
    pub measurements: SpocMeasurements,
}

impl SpocTce {
    pub fn product_filename(&self, kind: ProductKind) -> Option<&str> {
        match kind {
            ProductKind::Dvs => self.dvs.as_deref(),
            ProductKind::Dvm => self.dvm.as_deref(),
            ProductKind::Dvr => self.dvr.as_deref(),
        }
    }

    pub fn exomast_url(&self) -> String {
        derivation::exomast_url(&self.exomast_id)
    }
}

impl DetectionRecord for SpocTce {
    fn tic_id(&self) -> TicId {
        self.tic_id
    }

    fn planet_num(&self) -> PlanetNum {
        self.planet_num
    }

    fn sectors(&self) -> &Sectors {
        &self.sectors
    }

    fn display_identifier(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.exomast_id)
    }

    fn product_links(&self) -> Vec<ProductLink> {
        ProductKind::ALL
            .iter()
            .filter_map(|&kind| {
                let filename = self.product_filename(kind)?.trim();
                if filename.is_empty() {
                    return None;
                }
                Some(ProductLink {
                    kind,
                    filename: filename.to_string(),
                    url: derivation::spoc_product_url(filename),
                })
            })
            .collect()
    }
}

/// A TCE from the TESS-SPOC (FFI) pipeline.
///
/// The id and product filenames are derived once at construction and are
/// part of the record's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TessSpocTce {
    tic_id: TicId,
    sectors: Sectors,
    planet_num: PlanetNum,
    id: String,
    products: [String; 3],
}

impl TessSpocTce {
    pub fn new(tic_id: TicId, sectors: Sectors, planet_num: PlanetNum) -> Self {
        let id = derivation::tess_spoc_id(tic_id, &sectors, planet_num);
        let products = ProductKind::ALL.map(|kind| {
            derivation::tess_spoc_product_filename(kind, tic_id, &sectors, planet_num)
        });
        Self {
            tic_id,
            sectors,
            planet_num,
            id,
            products,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn product_filename(&self, kind: ProductKind) -> &str {
        match kind {
            ProductKind::Dvs => &self.products[0],
            ProductKind::Dvm => &self.products[1],
            ProductKind::Dvr => &self.products[2],
        }
    }
}

impl DetectionRecord for TessSpocTce {
    fn tic_id(&self) -> TicId {
        self.tic_id
    }

    fn planet_num(&self) -> PlanetNum {
        self.planet_num
    }

    fn sectors(&self) -> &Sectors {
        &self.sectors
    }

    fn display_identifier(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.id)
    }

    fn product_links(&self) -> Vec<ProductLink> {
        ProductKind::ALL
            .iter()
            .filter_map(|&kind| {
                let filename = self.product_filename(kind);
                let url = derivation::tess_spoc_product_url(filename)?;
                Some(ProductLink {
                    kind,
                    filename: filename.to_string(),
                    url,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spoc(dvs: Option<&str>) -> SpocTce {
        SpocTce {
            tic_id: TicId(261136679),
            exomast_id: "TIC261136679S0001S0013TCE1".to_string(),
            sectors: Sectors::from("s0001-s0013"),
            planet_num: PlanetNum(1),
            dvs: dvs.map(str::to_string),
            dvm: Some("tess2018206190142-s0001-s0013-0000000261136679-00106_dvm.pdf".into()),
            dvr: Some("tess2018206190142-s0001-s0013-0000000261136679-00106_dvr.pdf".into()),
            measurements: SpocMeasurements::default(),
        }
    }

    #[test]
    fn test_spoc_record_view() {
        let tce = spoc(Some("tess2018206190142-s0001-s0013-0000000261136679-01-00106_dvs.pdf"));
        assert_eq!(tce.display_identifier(), "TIC261136679S0001S0013TCE1");
        assert_eq!(tce.short_label(), "s0001s0013tce1");
        assert_eq!(tce.sector_span(), 13);

        let links = tce.product_links();
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].kind, ProductKind::Dvs);
        assert!(links[2]
            .url
            .starts_with("https://mast.stsci.edu/api/v0.1/Download/file/?uri=mast:TESS/product/"));
    }

    #[test]
    fn test_spoc_missing_product_is_skipped() {
        let tce = spoc(None);
        let kinds: Vec<ProductKind> = tce.product_links().iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![ProductKind::Dvm, ProductKind::Dvr]);
    }

    #[test]
    fn test_tess_spoc_derived_fields() {
        let tce = TessSpocTce::new(TicId(33979459), Sectors::from("s0056-s0069"), PlanetNum(1));
        assert_eq!(tce.id(), "TIC33979459S0056S0069TCE1_f");
        assert_eq!(tce.sector_span(), 14);
        assert_eq!(
            tce.product_filename(ProductKind::Dvm),
            "hlsp_tess-spoc_tess_phot_0000000033979459-s0056-s0069_tess_v1_dvm.pdf"
        );

        let links = tce.product_links();
        assert_eq!(links.len(), 3);
        assert!(links
            .iter()
            .all(|l| l.url.contains("/tess-spoc/s0056-s0069/target/0000/0000/3397/9459/")));
    }
}
