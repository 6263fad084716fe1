//! Complete HTML documents: search form, result page and error page.

use crate::build_info::BuildInfo;
use crate::db::RepositoryError;
use crate::render::escape_html;
use crate::render::table::{
    render_spoc_table, render_tess_spoc_table, sortable_value_names, SpocCounterparts,
};
use crate::services::{HighWatermarks, Pipeline, TceLookup};

pub const EXOFOP_TARGET_URL: &str = "https://exofop.ipac.caltech.edu/tess/target.php";
pub const SOURCE_REPO_URL: &str = "https://github.com/orionlee/tess_dv_fast";
pub const LIST_JS_URL: &str = "https://cdn.jsdelivr.net/gh/javve/list.js@2.3.1/dist/list.min.js";

const HEAD_COMMON: &str = r#"<meta name="viewport" content="width=device-width, initial-scale=1.0">
        <link rel="icon" href="data:,">"#;

const RESULT_STYLE: &str = r#"<style type="text/css">
body {
    margin-left: 16px;
    font-family: sans-serif;
}

footer {
    margin-bottom: 16px;
}

h1 a {
    text-decoration: none;
}

table {
    border-collapse: collapse;
    border: none;
    font-size: 0.9rem;
}

thead th {
    position: sticky;
    top: 0;
    background-color: darkgray;
    color: white;
}

th, td {
    padding: 5px 10px;
}

tbody tr:nth-child(even) {
    background-color: #f5f5f5;
}

th.sort {
    cursor: pointer;
}

.sort.asc, .sort.desc {
    color: yellow;
}

.sort.asc::after {
    content: "\025B4";
    padding-left: 3px;
}

.sort.desc::after {
    content: "\025BE";
    padding-left: 3px;
}

.rp_unreliable {
    color: #888;
}

.error {
    color: #d32f2f;
    border: 1px solid #d32f2f;
    padding: 12px;
    border-radius: 4px;
    background-color: #ffebee;
}

h2 {
    font-size: 1.2rem;
}

#tessSpocDupCtr {
    margin-bottom: 6px;
    margin-left: 12px;
    font-size: 80%;
}

tr.in_spoc {
    display: none;
}

.show_in_spoc tr.in_spoc {
    display: table-row;
}

#hideShowInSpocCtl {
    font-size: 80%;
}

#hideShowInSpocCtl::before {
    content: "Show";
}

.show_in_spoc #hideShowInSpocCtl::before {
    content: "Hide";
}
</style>"#;

/// Toggle for the TESS-SPOC rows that have a SPOC counterpart.
fn duplicate_control(num_in_spoc: usize) -> String {
    format!(
        r#"<div id="tessSpocDupCtr">
  <span id="tessSpocDupMsg">{num_in_spoc} TCEs have SPOC counterparts.</span>
  <button id="hideShowInSpocCtl" onclick="document.body.classList.toggle('show_in_spoc');"></button>
</div>"#
    )
}

fn source_error_notice(source: &str, err: &RepositoryError) -> String {
    format!(
        r#"<div class="error"><strong>{} lookup failed:</strong> {}</div>"#,
        source,
        escape_html(&err.to_string())
    )
}

fn spoc_section(lookup: &TceLookup) -> String {
    match &lookup.spoc {
        Some(Ok(records)) => render_spoc_table(records),
        Some(Err(e)) => source_error_notice("SPOC", e),
        None => String::new(),
    }
}

fn spoc_counterparts(lookup: &TceLookup) -> SpocCounterparts {
    match &lookup.spoc {
        Some(Ok(records)) => SpocCounterparts::new(records),
        _ => SpocCounterparts::new(&[]),
    }
}

fn tess_spoc_section(lookup: &TceLookup, counterparts: &SpocCounterparts) -> String {
    match &lookup.tess_spoc {
        Some(Ok(records)) => render_tess_spoc_table(records, counterparts),
        Some(Err(e)) => source_error_notice("TESS-SPOC", e),
        None => String::new(),
    }
}

fn tables_html(lookup: &TceLookup) -> String {
    let counterparts = spoc_counterparts(lookup);
    match lookup.pipeline {
        Pipeline::Spoc => spoc_section(lookup),
        Pipeline::TessSpoc => tess_spoc_section(lookup, &counterparts),
        Pipeline::Both => {
            let mut html = format!(
                "<h2>SPOC (2-min cadence) - {} TCEs</h2>\n{}\n",
                lookup.spoc_count(),
                spoc_section(lookup)
            );
            if lookup.tess_spoc_error().is_some() {
                html.push_str(&format!(
                    "<h2>TESS-SPOC (FFI)</h2>\n{}\n",
                    tess_spoc_section(lookup, &counterparts)
                ));
            } else if let Some(Ok(records)) = &lookup.tess_spoc {
                if !records.is_empty() {
                    html.push_str(&format!(
                        "<h2>TESS-SPOC (FFI) - {} TCEs</h2>\n",
                        records.len()
                    ));
                    let num_in_spoc = counterparts.count(records);
                    if num_in_spoc > 0 {
                        html.push_str(&duplicate_control(num_in_spoc));
                        html.push('\n');
                    }
                    html.push_str(&tess_spoc_section(lookup, &counterparts));
                    html.push('\n');
                }
            }
            html
        }
    }
}

fn list_js_options() -> String {
    let names: Vec<String> = sortable_value_names()
        .iter()
        .map(|name| format!("'{}'", name))
        .collect();
    format!("{{valueNames: [{}]}}", names.join(", "))
}

/// Result page for a completed lookup.
pub fn render_result_page(lookup: &TceLookup) -> String {
    let tic = escape_html(&lookup.tic.to_string());
    format!(
        r#"<!DOCTYPE html>
<html>
    <head>
        {head}
        <title>({total}) TCEs for TIC {tic}</title>
        {style}
    </head>
    <body>
        <div id="result">
            <h1>TCEs for TIC <a href="{exofop}?id={tic}" target="_exofop">{tic}</a>
            <input class="search" placeholder="Search table" style="margin-left: 40ch;" accesskey="/">
            </h1>
            {tables}
        </div>

        <hr>
        <footer>
            <a href="/tces">New Search</a>
        </footer>

        <script src="{list_js}"></script>
        <script>
            if (document.querySelector('#result table')) {{
                const options = {options};
                const tceList = new List('result', options);
            }}
        </script>
    </body>
</html>"#,
        head = HEAD_COMMON,
        total = lookup.total_count(),
        tic = tic,
        style = RESULT_STYLE,
        exofop = EXOFOP_TARGET_URL,
        tables = tables_html(lookup),
        list_js = LIST_JS_URL,
        options = list_js_options(),
    )
}

/// Search form with the data release and build footer.
pub fn render_home_page(watermarks: &HighWatermarks, build: &BuildInfo) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
    <head>
        {head}
        <title>Search TESS TCEs</title>
        <style type="text/css">
        body {{
            margin-left: 16px;
            font-family: sans-serif;
        }}
        </style>
    </head>
    <body>
        <h1>Search TESS TCEs</h1>
        <form action="/tces">
            <div>
                TIC: <input name="tic" type="number" placeholder="TIC id, e.g., 261136679">
                <select name="pipeline">
                    <option value="">all</option>
                    <option value="spoc">SPOC</option>
                    <option value="tess_spoc">TESS-SPOC</option>
                </select>
                <input type="submit">
            </div>
        </form>
        <footer style="margin-top: 5vh; font-size: 85%;">
            <p><strong>SPOC</strong> (2 min cadence): based on data published by <a href="https://archive.stsci.edu/" target="_blank">MAST</a>:</p>
            <ul>
                <li><a href="https://archive.stsci.edu/tess/bulk_downloads/bulk_downloads_tce.html" target="_blank">TCE statistics bulk downloads</a> (<code>csv</code> files)</li>
                <li><a href="https://archive.stsci.edu/tess/bulk_downloads/bulk_downloads_ffi-tp-lc-dv.html" target="_blank">TESS DV files bulk downloads</a> (<code>sh</code> files)</li>
            </ul>
            Latest SPOC:
            <ul>
                <li>Single sector: {spoc_single}</li>
                <li>Multi sector: {spoc_multi}</li>
            </ul>

            <p><strong>TESS-SPOC</strong> (FFI): based on data published by <a href="https://archive.stsci.edu/hlsp/tess-spoc" target="_blank">MAST HLSP TESS-SPOC</a>:</p>
            Latest TESS-SPOC:
            <ul>
                <li>Single sector: {tess_spoc_single}</li>
                <li>Multi sector: {tess_spoc_multi}</li>
            </ul>

            <br>
            <a href="{repo}/" target="_blank">Sources / Issues</a><br>
            Build:
            <a target="_blank" href="{repo}/commit/{sha}">{short_sha}</a><br>
        </footer>
    </body>
</html>"#,
        head = HEAD_COMMON,
        spoc_single = escape_html(&watermarks.spoc_single_sector),
        spoc_multi = escape_html(&watermarks.spoc_multi_sector),
        tess_spoc_single = escape_html(&watermarks.tess_spoc_single_sector),
        tess_spoc_multi = escape_html(&watermarks.tess_spoc_multi_sector),
        repo = SOURCE_REPO_URL,
        sha = escape_html(build.sha()),
        short_sha = escape_html(build.short_sha()),
    )
}

/// Error page. `message` is plain text and is escaped here.
pub fn render_error_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
    <head>
        {head}
        <title>Error - Search TESS TCEs</title>
        <style type="text/css">
            body {{
                margin-left: 16px;
                font-family: sans-serif;
            }}
            .error {{
                color: #d32f2f;
                border: 1px solid #d32f2f;
                padding: 12px;
                border-radius: 4px;
                background-color: #ffebee;
            }}
        </style>
    </head>
    <body>
        <h1>Search TESS TCEs</h1>
        <div class="error">
            <strong>Error:</strong> {message}
        </div>
        <p><a href="/tces">Back to search</a></p>
    </body>
</html>"#,
        head = HEAD_COMMON,
        message = escape_html(message),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlanetNum, Sectors, SpocMeasurements, SpocTce, TessSpocTce, TicId};

    fn spoc(id: &str) -> SpocTce {
        SpocTce {
            tic_id: TicId(33979459),
            exomast_id: id.to_string(),
            sectors: Sectors::from("s0056-s0069"),
            planet_num: PlanetNum(1),
            dvs: None,
            dvm: None,
            dvr: None,
            measurements: SpocMeasurements::default(),
        }
    }

    fn lookup(
        pipeline: Pipeline,
        spoc: Option<Result<Vec<SpocTce>, RepositoryError>>,
        tess_spoc: Option<Result<Vec<TessSpocTce>, RepositoryError>>,
    ) -> TceLookup {
        TceLookup {
            tic: TicId(33979459),
            pipeline,
            spoc,
            tess_spoc,
        }
    }

    fn tess_spoc() -> TessSpocTce {
        TessSpocTce::new(TicId(33979459), Sectors::from("s0056-s0069"), PlanetNum(1))
    }

    #[test]
    fn test_result_page_both() {
        let page = render_result_page(&lookup(
            Pipeline::Both,
            Some(Ok(vec![spoc("TIC33979459S0056S0069TCE1")])),
            Some(Ok(vec![tess_spoc()])),
        ));
        assert!(page.contains("<title>(2) TCEs for TIC 33979459</title>"));
        assert!(page.contains(
            r#"<a href="https://exofop.ipac.caltech.edu/tess/target.php?id=33979459" target="_exofop">33979459</a>"#
        ));
        assert!(page.contains("<h2>SPOC (2-min cadence) - 1 TCEs</h2>"));
        assert!(page.contains("<h2>TESS-SPOC (FFI) - 1 TCEs</h2>"));
        assert!(page.contains(
            r#"<span id="tessSpocDupMsg">1 TCEs have SPOC counterparts.</span>"#
        ));
        assert!(page.contains(r#"<tr class="in_spoc"><td class="data row0 col0">s0056s0069tce1_f</td>"#));
        assert!(!page.contains(".replace("));
        assert!(page.contains(
            "{valueNames: ['col0', 'col4', 'col5', 'col6', 'col7', 'col8', 'col9', 'col10', 'col11']}"
        ));
        assert!(page.contains(r#"<a href="/tces">New Search</a>"#));
    }

    #[test]
    fn test_duplicate_control_omitted_without_counterparts() {
        let page = render_result_page(&lookup(
            Pipeline::Both,
            Some(Ok(vec![spoc("TIC33979459S0001S0013TCE1")])),
            Some(Ok(vec![tess_spoc()])),
        ));
        assert!(page.contains("<h2>TESS-SPOC (FFI) - 1 TCEs</h2>"));
        assert!(!page.contains(r#"<div id="tessSpocDupCtr">"#));
        assert!(!page.contains(r#"<tr class="in_spoc">"#));
    }

    #[test]
    fn test_duplicate_control_when_spoc_lookup_failed() {
        let page = render_result_page(&lookup(
            Pipeline::Both,
            Some(Err(RepositoryError::unavailable("database file not found"))),
            Some(Ok(vec![tess_spoc()])),
        ));
        assert!(page.contains("SPOC lookup failed:"));
        assert!(!page.contains(r#"<div id="tessSpocDupCtr">"#));
        assert!(page.contains(r#"<tr><td class="data row0 col0">s0056s0069tce1_f</td>"#));
    }

    #[test]
    fn test_result_page_both_omits_empty_tess_spoc() {
        let page = render_result_page(&lookup(Pipeline::Both, Some(Ok(vec![])), Some(Ok(vec![]))));
        assert!(page.contains("<title>(0) TCEs for TIC 33979459</title>"));
        assert!(page.contains("No SPOC TCE"));
        assert!(!page.contains("<h2>TESS-SPOC"));
    }

    #[test]
    fn test_result_page_single_pipeline() {
        let page = render_result_page(&lookup(Pipeline::TessSpoc, None, Some(Ok(vec![]))));
        assert!(page.contains("No TESS-SPOC TCE"));
        assert!(!page.contains("<h2>"));
    }

    #[test]
    fn test_partial_failure_notice() {
        let page = render_result_page(&lookup(
            Pipeline::Both,
            Some(Ok(vec![spoc("TIC33979459S0056S0069TCE1")])),
            Some(Err(RepositoryError::unavailable("database file not found: <x>"))),
        ));
        assert!(page.contains("<h2>TESS-SPOC (FFI)</h2>"));
        assert!(page.contains("TESS-SPOC lookup failed:"));
        assert!(page.contains("&lt;x&gt;"));
        assert!(page.contains(r#"id="table_spoc""#));
    }

    #[test]
    fn test_home_page() {
        let page = render_home_page(
            &HighWatermarks::current(),
            &BuildInfo::new("0123456789abcdef"),
        );
        assert!(page.contains("<li>Single sector: s0097</li>"));
        assert!(page.contains("<li>Multi sector: s0056-s0069</li>"));
        assert!(page.contains(
            r#"href="https://github.com/orionlee/tess_dv_fast/commit/0123456789abcdef">01234567</a>"#
        ));
        assert!(page.contains(r#"<input name="tic""#));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let page = render_error_page("Invalid TIC: <script>. Must be a positive integer.");
        assert!(page.contains("Invalid TIC: &lt;script&gt;. Must be a positive integer."));
        assert!(page.contains(r#"<a href="/tces">Back to search</a>"#));
    }

    #[test]
    fn test_result_page_is_idempotent() {
        let l = lookup(
            Pipeline::Both,
            Some(Ok(vec![spoc("TIC33979459S0056S0069TCE1")])),
            Some(Ok(vec![tess_spoc()])),
        );
        assert_eq!(render_result_page(&l), render_result_page(&l));
    }
}
