//! HTML rendering of lookup results.
//!
//! `table` turns sorted TCEs into the result tables; `page` wraps them (or the
//! search form, or an error) into complete documents. Rendering is pure: the
//! same input always produces byte-identical output.

pub mod page;
pub mod table;

pub use page::{render_error_page, render_home_page, render_result_page};
pub use table::{render_spoc_table, render_tess_spoc_table, SpocCounterparts};

/// Escape text for use in HTML content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&#34;x&#34;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("s0001s0013tce1"), "s0001s0013tce1");
    }
}
