//! Bill detail page parsing.
//!
//! The detail page is a flat run of labeled spans, sponsor links, the
//! actions table, and a strip of auxiliary links. Everything here reads the
//! markup as served; interpretation (classification, category resolution)
//! happens in the pipeline.

use chrono::{NaiveDate, NaiveTime};
use scraper::{ElementRef, Html};

use super::sel;

/// Everything the sync pipeline needs from one bill detail page.
#[derive(Debug, Clone, Default)]
pub struct DetailPage {
    pub title: String,
    pub short_summary: String,
    pub full_summary: String,
    pub sponsors: SponsorSet,
    /// Raw text of the actions table, fingerprinted for change detection.
    pub actions_text: String,
    pub actions: Vec<ParsedAction>,
    /// Href of the vote-history link, when the page has one.
    pub votes_href: Option<String>,
}

/// Sponsor member ids in page order. Links without a member id record
/// `None` so positions still line up with the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SponsorSet {
    pub ids: Vec<Option<i64>>,
    pub chief: Option<i64>,
    pub house_primary: Option<i64>,
    pub senate_primary: Option<i64>,
}

/// One row of the actions table, not yet classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAction {
    /// Milliseconds since the epoch, `None` when the cell is not a date.
    pub date: Option<i64>,
    pub chamber: String,
    pub description: String,
    /// Href of the first link in the description cell, used to resolve
    /// committee assignments.
    pub committee_href: Option<String>,
}

pub fn parse_detail_page(html: &str) -> DetailPage {
    let document = Html::parse_document(html);

    let title_spans = content_spans_after(&document, "Short Description");
    let title = title_spans.first().map(span_text).unwrap_or_default();

    let synopsis_spans = content_spans_after(&document, "Synopsis");
    let short_summary = synopsis_spans.first().map(span_text).unwrap_or_default();
    // The remaining content spans continue the synopsis across paragraphs.
    let full_summary = synopsis_spans.iter().skip(1).map(span_text).collect();

    let actions_table_sel = sel(r#"a[name="actions"] ~ table"#);
    let actions_table = document.select(&actions_table_sel).next();
    let actions_text = actions_table.map(|t| span_text(&t)).unwrap_or_default();
    let actions = actions_table.map(parse_actions).unwrap_or_default();

    let legislinks_sel = sel("a.legislinks");
    let votes_href = document
        .select(&legislinks_sel)
        .find(|a| a.text().collect::<String>().contains("Votes"))
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string);

    DetailPage {
        title,
        short_summary,
        full_summary,
        sponsors: parse_sponsors(&document),
        actions_text,
        actions,
        votes_href,
    }
}

/// Content spans that follow the first span containing `label`. The page
/// lays labels and values out as sibling spans, so this is the value list
/// for that label.
fn content_spans_after<'a>(document: &'a Html, label: &str) -> Vec<ElementRef<'a>> {
    let span_sel = sel("span");
    let Some(label_span) = document
        .select(&span_sel)
        .find(|span| span.text().collect::<String>().contains(label))
    else {
        return Vec::new();
    };
    label_span
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "span" && el.value().classes().any(|c| c == "content"))
        .collect()
}

fn span_text(element: &ElementRef) -> String {
    element.text().collect()
}

fn parse_sponsors(document: &Html) -> SponsorSet {
    let anchor_sel = sel("a.content");
    let mut sponsors = SponsorSet::default();
    let mut senate_selected = false;
    for (index, anchor) in document.select(&anchor_sel).enumerate() {
        let href = anchor.value().attr("href").unwrap_or("");
        let id = member_id_from_href(href);
        if index == 0 {
            sponsors.chief = id;
        }
        if href.contains("house") {
            // Every house link overwrites, so the last house sponsor listed
            // becomes the primary; the senate primary is the first listed.
            sponsors.house_primary = id;
        } else if href.contains("senate") && !senate_selected {
            senate_selected = true;
            sponsors.senate_primary = id;
        }
        sponsors.ids.push(id);
    }
    sponsors
}

fn parse_actions(table: ElementRef) -> Vec<ParsedAction> {
    let row_sel = sel("tr");
    let cell_sel = sel("td.content");
    let anchor_sel = sel("a");

    let mut actions = Vec::new();
    for row in table.select(&row_sel) {
        let cells: Vec<ElementRef> = row.select(&cell_sel).collect();
        // Header and spacer rows have a different cell count.
        if cells.len() != 3 {
            continue;
        }
        let date = parse_action_date(&span_text(&cells[0]));
        let chamber = span_text(&cells[1]);
        let description = span_text(&cells[2]);
        let committee_href = cells[2]
            .select(&anchor_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string);
        actions.push(ParsedAction {
            date,
            chamber,
            description,
            committee_href,
        });
    }
    actions
}

fn parse_action_date(text: &str) -> Option<i64> {
    let date = NaiveDate::parse_from_str(text.trim(), "%m/%d/%Y").ok()?;
    Some(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
}

fn member_id_from_href(href: &str) -> Option<i64> {
    let (_, rest) = href.split_once("MemberID=")?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Numeric committee id from an assignment link's href.
pub(crate) fn committee_id_from_href(href: &str) -> Option<String> {
    let (_, rest) = href.split_once("committeeID=")?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}
