//! HTML and PDF parsers for the tracker site's page formats.
//!
//! All parsing is synchronous over already-fetched bodies. [`scraper::Html`]
//! is not `Send`, so nothing in here may be held across an await point.

pub mod detail;
pub mod fulltext;
pub mod listing;
pub mod rollcall;

use scraper::Selector;

/// Parse a selector known to be valid at compile time.
pub(crate) fn sel(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector")
}
