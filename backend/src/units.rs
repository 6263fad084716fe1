//! Unit conversions and value formatting for TCE measurements.

use serde::{Deserialize, Serialize};

/// Earth radius over Jupiter radius (equatorial, km).
pub const R_EARTH_TO_R_JUPITER: f64 = 6378.1 / 71492.0;

/// Offsets at or above this many standard deviations are highlighted.
pub const HIGH_SIGNIFICANCE_SIGMA: f64 = 3.0;

const HIGH_SIGNIFICANCE_STYLE: &str = r#" style="color: red; font-weight: bold;""#;

/// Planet radius in Jupiter radii from Earth radii.
pub fn earth_to_jupiter_radii(r_earth: f64) -> f64 {
    r_earth * R_EARTH_TO_R_JUPITER
}

/// Transit depth in percent from the stored ppm value.
pub fn depth_ppm_to_percent(depth_ppm: f64) -> f64 {
    depth_ppm / 10_000.0
}

/// A sky offset (arcsec) with its 1-sigma uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub value: f64,
    pub error: f64,
}

impl Offset {
    pub fn new(value: f64, error: f64) -> Self {
        Self { value, error }
    }

    /// `value / error`, or 0 when the error is exactly zero.
    pub fn significance(&self) -> f64 {
        if self.error == 0.0 {
            0.0
        } else {
            self.value / self.error
        }
    }

    /// The source marks TCEs without a centroid offset with a zero value and
    /// a negative error (`-1` in the csv, `-0.0` after some round trips).
    pub fn is_not_applicable(&self) -> bool {
        self.error.is_sign_negative() && self.value.abs() < 0.05
    }

    pub fn is_high_significance(&self) -> bool {
        self.significance().abs() >= HIGH_SIGNIFICANCE_SIGMA
    }

    /// `"<value> <span>(<sigma>)</span>"`, with the span highlighted for high
    /// significance, or `N/A`.
    pub fn to_html(&self) -> String {
        if self.is_not_applicable() {
            return "N/A".to_string();
        }
        let style = if self.is_high_significance() {
            HIGH_SIGNIFICANCE_STYLE
        } else {
            ""
        };
        format!(
            "{:.0} <span{}>({:.1})</span>",
            self.value,
            style,
            self.significance()
        )
    }
}

/// Planet radius in Jupiter radii, formatted for the `Rp` column.
///
/// When the host star's radius was not measured (the pipeline fell back to
/// solar values) the planet radius inherits that guess, so the value is
/// greyed out and annotated rather than shown like a measured one.
pub fn format_planet_radius(r_earth: f64, stellar_radius_is_solar: bool) -> String {
    let r_jup = earth_to_jupiter_radii(r_earth);
    if stellar_radius_is_solar {
        format!(
            r#"<span class="rp_unreliable" title="Stellar radius assumed solar; planet radius unreliable">{:.4}*</span>"#,
            r_jup
        )
    } else {
        format!("{:.4}", r_jup)
    }
}
