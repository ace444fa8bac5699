//! Full bill text extraction.

use scraper::Html;

use super::sel;

/// Pull the enrolled bill text out of a full-text page. The page renders the
/// text as a table of numbered lines; rows without a line number are
/// headers, page breaks, and other chrome.
pub fn extract_full_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let row_sel = sel("tr");
    let marker_sel = sel(".xsl");
    let number_sel = sel("td.number");
    let line_sel = sel("td.xsl");

    let mut full_text = String::new();
    for row in document.select(&row_sel) {
        if row.select(&marker_sel).next().is_none() {
            continue;
        }
        let numbered = row
            .select(&number_sel)
            .any(|cell| !cell.text().collect::<String>().is_empty());
        if numbered {
            for cell in row.select(&line_sel) {
                full_text.extend(cell.text());
            }
        }
    }
    full_text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_numbered_lines_and_skips_chrome() {
        let html = r#"
            <table>
                <tr><td class="xsl">SB0042 Enrolled</td></tr>
                <tr><td class="number">1</td><td class="xsl">Be it enacted by the People,</td></tr>
                <tr><td class="number">2</td><td class="xsl">represented in the General Assembly:</td></tr>
                <tr><td class="number"></td><td class="xsl">Page 2</td></tr>
                <tr><td>unrelated row</td></tr>
            </table>
        "#;
        let text = extract_full_text(html);
        assert!(text.contains("Be it enacted by the People,"));
        assert!(text.contains("represented in the General Assembly:"));
        assert!(!text.contains("SB0042 Enrolled"));
        assert!(!text.contains("Page 2"));
    }

    #[test]
    fn empty_page_yields_empty_text() {
        assert_eq!(extract_full_text("<html><body></body></html>"), "");
    }
}
