//! Result tables for SPOC and TESS-SPOC TCEs.
//!
//! Column order and the `colN` classes are relied on by the list.js sorting
//! script, so both are fixed.

use std::collections::HashSet;

use crate::derivation::spoc_equivalent_id;
use crate::models::{DetectionRecord, ProductKind, ProductLink, SpocTce, TessSpocTce};
use crate::render::escape_html;
use crate::units::{depth_ppm_to_percent, format_planet_radius, Offset};

pub const SPOC_TABLE_ID: &str = "table_spoc";
pub const TESS_SPOC_TABLE_ID: &str = "table_tess_spoc";

pub const NO_SPOC_TCE: &str = "No SPOC TCE";
pub const NO_TESS_SPOC_TCE: &str = "No TESS-SPOC TCE";

/// Row class of TESS-SPOC TCEs that SPOC also reported; hidden by default.
pub const IN_SPOC_CLASS: &str = "in_spoc";

/// A table column: header HTML and whether list.js may sort on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub heading: &'static str,
    pub sortable: bool,
}

const fn col(heading: &'static str, sortable: bool) -> Column {
    Column { heading, sortable }
}

pub const SPOC_COLUMNS: [Column; 13] = [
    col("exomast_id", true),
    col("dvs", false),
    col("dvm", false),
    col("dvr", false),
    col("Period<br>day", true),
    col("Epoch<br>BTJD", true),
    col("Duration<br>hr", true),
    col("R<sub>p</sub><br>R<sub>j</sub>", true),
    col("Depth<br>%", true),
    col("Impact b", true),
    col("TicOffset<br>\" (σ)", true),
    col("OotOffset<br>\" (σ)", true),
    col("Codes", false),
];

pub const TESS_SPOC_COLUMNS: [Column; 4] = [
    col("id", false),
    col("dvs", false),
    col("dvm", false),
    col("dvr", false),
];

const CODES_INPUT_STYLE: &str = "margin-left: 3ch; font-size: 90%; color: #666; width: 10ch;";

/// `colN` class names of the sortable SPOC columns, for the list.js setup.
pub fn sortable_value_names() -> Vec<String> {
    SPOC_COLUMNS
        .iter()
        .enumerate()
        .filter(|(_, c)| c.sortable)
        .map(|(i, _)| format!("col{}", i))
        .collect()
}

fn header_html(columns: &[Column]) -> String {
    let mut html = String::from("<thead><tr>");
    for (i, column) in columns.iter().enumerate() {
        if column.sortable {
            html.push_str(&format!(
                r#"<th class="col_heading level0 col{i} sort" data-sort="col{i}">{}</th>"#,
                column.heading
            ));
        } else {
            html.push_str(&format!(
                r#"<th class="col_heading level0 col{i}">{}</th>"#,
                column.heading
            ));
        }
    }
    html.push_str("</tr></thead>");
    html
}

fn row_html(row: usize, class: Option<&str>, cells: &[String]) -> String {
    let mut html = match class {
        Some(class) => format!(r#"<tr class="{class}">"#),
        None => String::from("<tr>"),
    };
    for (c, cell) in cells.iter().enumerate() {
        html.push_str(&format!(
            r#"<td class="data row{row} col{c}">{cell}</td>"#
        ));
    }
    html.push_str("</tr>");
    html
}

fn product_cell(links: &[ProductLink], kind: ProductKind) -> String {
    links
        .iter()
        .find(|link| link.kind == kind)
        .map(|link| {
            format!(
                r#"<a target="_blank" href="{}">{}</a>"#,
                escape_html(&link.url),
                escape_html(crate::derivation::product_label(&link.filename))
            )
        })
        .unwrap_or_default()
}

fn product_cells(record: &impl DetectionRecord) -> Vec<String> {
    let links = record.product_links();
    ProductKind::ALL
        .iter()
        .map(|&kind| product_cell(&links, kind))
        .collect()
}

fn fixed(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{:.*}", precision, v))
        .unwrap_or_default()
}

fn offset_cell(offset: Option<Offset>) -> String {
    offset.map(|o| o.to_html()).unwrap_or_default()
}

/// The copy-paste parameter string of a SPOC TCE, or `None` when a fit
/// parameter it needs is missing.
pub fn spoc_codes(tce: &SpocTce) -> Option<String> {
    let m = &tce.measurements;
    Some(format!(
        "epoch={}, duration_hr={}, period={}, label=\"{}\", transit_depth_percent={:.4},",
        m.epoch?,
        m.duration?,
        m.period?,
        tce.short_label(),
        depth_ppm_to_percent(m.depth_ppm?)
    ))
}

fn codes_cell(tce: &SpocTce) -> String {
    spoc_codes(tce)
        .map(|codes| {
            format!(
                r#"<input type="text" value='{}' readonly style="{}" onclick="this.select();">"#,
                escape_html(&codes),
                CODES_INPUT_STYLE
            )
        })
        .unwrap_or_default()
}

fn spoc_cells(tce: &SpocTce) -> Vec<String> {
    let m = &tce.measurements;
    let mut cells = Vec::with_capacity(SPOC_COLUMNS.len());
    cells.push(format!(
        r#"<a target="_exomast" href="{}">{}</a>"#,
        escape_html(&tce.exomast_url()),
        escape_html(&tce.short_label())
    ));
    cells.extend(product_cells(tce));
    cells.push(fixed(m.period, 6));
    cells.push(fixed(m.epoch, 1));
    cells.push(fixed(m.duration, 3));
    cells.push(
        m.planet_radius
            .map(|r| format_planet_radius(r, m.stellar_radius_is_solar))
            .unwrap_or_default(),
    );
    cells.push(fixed(m.depth_ppm.map(depth_ppm_to_percent), 4));
    cells.push(fixed(m.impact, 3));
    cells.push(offset_cell(m.tic_offset));
    cells.push(offset_cell(m.oot_offset));
    cells.push(codes_cell(tce));
    cells
}

fn tess_spoc_cells(tce: &TessSpocTce) -> Vec<String> {
    let mut cells = Vec::with_capacity(TESS_SPOC_COLUMNS.len());
    cells.push(escape_html(&tce.short_label()));
    cells.extend(product_cells(tce));
    cells
}

/// SPOC TCEs as a sortable table. Records are rendered in the given order.
pub fn render_spoc_table(records: &[SpocTce]) -> String {
    if records.is_empty() {
        return NO_SPOC_TCE.to_string();
    }
    let mut html = format!(r#"<table id="{}">"#, SPOC_TABLE_ID);
    html.push_str(&header_html(&SPOC_COLUMNS));
    html.push_str(r#"<tbody class="list">"#);
    for (row, tce) in records.iter().enumerate() {
        html.push_str(&row_html(row, None, &spoc_cells(tce)));
    }
    html.push_str("</tbody></table>");
    html
}

/// Matches TESS-SPOC TCEs against the SPOC TCEs of the same lookup. A
/// TESS-SPOC TCE has a SPOC counterpart when its id minus the `_f` suffix is
/// a SPOC id.
pub struct SpocCounterparts {
    labels: HashSet<String>,
}

impl SpocCounterparts {
    pub fn new(spoc: &[SpocTce]) -> Self {
        Self {
            labels: spoc.iter().map(|t| t.short_label()).collect(),
        }
    }

    pub fn contains(&self, tce: &TessSpocTce) -> bool {
        self.labels
            .contains(&spoc_equivalent_id(&tce.short_label()))
    }

    pub fn count(&self, records: &[TessSpocTce]) -> usize {
        records.iter().filter(|t| self.contains(t)).count()
    }
}

/// TESS-SPOC TCEs as a plain table. Records are rendered in the given order;
/// those found in `counterparts` get the [`IN_SPOC_CLASS`] row class.
pub fn render_tess_spoc_table(records: &[TessSpocTce], counterparts: &SpocCounterparts) -> String {
    if records.is_empty() {
        return NO_TESS_SPOC_TCE.to_string();
    }
    let mut html = format!(r#"<table id="{}">"#, TESS_SPOC_TABLE_ID);
    html.push_str(&header_html(&TESS_SPOC_COLUMNS));
    html.push_str("<tbody>");
    for (row, tce) in records.iter().enumerate() {
        let class = counterparts.contains(tce).then_some(IN_SPOC_CLASS);
        html.push_str(&row_html(row, class, &tess_spoc_cells(tce)));
    }
    html.push_str("</tbody></table>");
    html
}
