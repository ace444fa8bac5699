//! Bill listing page parsing.

use scraper::Html;
use tracing::warn;
use url::Url;

use super::sel;

/// Extract the bill detail links from a session listing page. Each list item
/// carries the bill's status link as its first anchor; links that do not
/// resolve against the listing URL are dropped.
pub fn bill_links(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let item_sel = sel("li");
    let anchor_sel = sel("a");

    let mut links = Vec::new();
    for item in document.select(&item_sel) {
        let Some(href) = item
            .select(&anchor_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };
        match base.join(href) {
            Ok(url) => links.push(url),
            Err(err) => {
                warn!(href = %href, error = %err, "dropping bill link that does not resolve");
            }
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_the_first_anchor_of_each_item() {
        let base = Url::parse("https://example.gov/legislation/grplist.asp").unwrap();
        let html = r#"
            <ul>
                <li><a href="/legislation/BillStatus.asp?DocNum=1&GA=101&DocTypeID=SB">SB1</a></li>
                <li><a href="BillStatus.asp?DocNum=2&GA=101&DocTypeID=SB">SB2</a>
                    <a href="/other">ignored</a></li>
                <li>no anchor here</li>
            </ul>
        "#;
        let links = bill_links(html, &base);
        assert_eq!(links.len(), 2);
        assert_eq!(
            links[0].as_str(),
            "https://example.gov/legislation/BillStatus.asp?DocNum=1&GA=101&DocTypeID=SB"
        );
        assert_eq!(
            links[1].as_str(),
            "https://example.gov/legislation/BillStatus.asp?DocNum=2&GA=101&DocTypeID=SB"
        );
    }

    #[test]
    fn relative_links_resolve_against_the_listing_url() {
        let base = Url::parse("https://example.gov/legislation/grplist.asp?GA=101").unwrap();
        let html = r#"<li><a href="BillStatus.asp?DocNum=7">HB7</a></li>"#;
        let links = bill_links(html, &base);
        assert_eq!(
            links[0].as_str(),
            "https://example.gov/legislation/BillStatus.asp?DocNum=7"
        );
    }
}
