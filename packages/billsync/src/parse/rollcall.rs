//! Vote history pages and roll-call PDFs.
//!
//! The vote history page lists one row per recorded vote, each linking to a
//! PDF of the roll call. The PDFs lay legislator names out in columns, each
//! name preceded by its vote code, so extraction recovers positioned text
//! runs, reassembles them into lines, and scans each line as alternating
//! code/name pairs.

use std::collections::{BTreeMap, HashMap};

use lopdf::content::Content;
use lopdf::{Document, Object};
use scraper::{ElementRef, Html};

use super::sel;
use crate::error::RollCallError;
use crate::types::VoteCode;

/// One row of the vote history table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteLink {
    pub href: String,
    pub chamber: String,
}

/// Extract the roll-call rows from a vote history page. The table is the
/// one whose heading cell reads "Voting Record"; every sibling row with a
/// link is a recorded vote.
pub fn vote_links(html: &str) -> Vec<VoteLink> {
    let document = Html::parse_document(html);
    let heading_sel = sel("td.whiteheading");
    let anchor_sel = sel("a");
    let cell_sel = sel("td");

    let Some(heading) = document
        .select(&heading_sel)
        .filter(|td| td.text().collect::<String>().contains("Voting Record"))
        .last()
    else {
        return Vec::new();
    };
    let Some(heading_row) = heading.parent().and_then(ElementRef::wrap) else {
        return Vec::new();
    };
    let Some(table_body) = heading_row.parent() else {
        return Vec::new();
    };

    let mut links = Vec::new();
    for row in table_body.children().filter_map(ElementRef::wrap) {
        if row.id() == heading_row.id() || row.value().name() != "tr" {
            continue;
        }
        let Some(href) = row
            .select(&anchor_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };
        let chamber = row
            .select(&cell_sel)
            .nth(1)
            .map(|td| td.text().collect::<String>())
            .unwrap_or_default();
        links.push(VoteLink {
            href: href.to_string(),
            chamber,
        });
    }
    links
}

/// Parse a roll-call PDF into a name-to-vote map. Names repeated across
/// pages or corrected later in the document keep their last vote.
pub fn parse_roll_call(bytes: &[u8]) -> Result<HashMap<String, VoteCode>, RollCallError> {
    let document = Document::load_mem(bytes)?;
    let mut votes = HashMap::new();
    for (_, page_id) in document.get_pages() {
        let data = document.get_page_content(page_id)?;
        let content = Content::decode(&data)?;
        for line in page_lines(&content) {
            scan_line(&line, &mut votes);
        }
    }
    Ok(votes)
}

/// A positioned piece of text from a content stream.
struct TextRun {
    x: f32,
    y: f32,
    text: String,
}

/// Replay the text-positioning operators and collect the runs each text
/// showing operator emits, then reassemble them into visual lines: rows
/// ordered top to bottom, runs within a row left to right.
fn page_lines(content: &Content) -> Vec<String> {
    let mut runs = Vec::new();
    let mut x = 0.0_f32;
    let mut y = 0.0_f32;
    let mut leading = 0.0_f32;

    for op in &content.operations {
        match op.operator.as_str() {
            "BT" => {
                x = 0.0;
                y = 0.0;
            }
            "Tm" => {
                if let (Some(e), Some(f)) = (number(op.operands.get(4)), number(op.operands.get(5)))
                {
                    x = e;
                    y = f;
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) =
                    (number(op.operands.first()), number(op.operands.get(1)))
                {
                    x += tx;
                    y += ty;
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) =
                    (number(op.operands.first()), number(op.operands.get(1)))
                {
                    x += tx;
                    y += ty;
                    leading = -ty;
                }
            }
            "TL" => {
                if let Some(l) = number(op.operands.first()) {
                    leading = l;
                }
            }
            "T*" => y -= leading,
            "'" => {
                y -= leading;
                if let Some(text) = string_operand(op.operands.first()) {
                    runs.push(TextRun { x, y, text });
                }
            }
            "Tj" => {
                if let Some(text) = string_operand(op.operands.first()) {
                    runs.push(TextRun { x, y, text });
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = op.operands.first() {
                    let text: String = items
                        .iter()
                        .filter_map(|item| match item {
                            Object::String(bytes, _) => {
                                Some(String::from_utf8_lossy(bytes).into_owned())
                            }
                            _ => None,
                        })
                        .collect();
                    if !text.is_empty() {
                        runs.push(TextRun { x, y, text });
                    }
                }
            }
            _ => {}
        }
    }

    let mut rows: BTreeMap<i64, Vec<TextRun>> = BTreeMap::new();
    for run in runs {
        rows.entry(run.y.round() as i64).or_default().push(run);
    }
    // Page coordinates grow upward, so reverse for reading order.
    rows.into_iter()
        .rev()
        .map(|(_, mut row)| {
            row.sort_by(|a, b| a.x.total_cmp(&b.x));
            row.iter()
                .map(|run| run.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn number(operand: Option<&Object>) -> Option<f32> {
    match operand {
        Some(Object::Integer(value)) => Some(*value as f32),
        Some(Object::Real(value)) => Some(*value),
        _ => None,
    }
}

fn string_operand(operand: Option<&Object>) -> Option<String> {
    match operand {
        Some(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}

/// Scan one line as alternating code/name pairs. The columns are strictly
/// aligned, so the scan steps two fields at a time; a pair only counts when
/// the first field is a vote code and the second starts with a letter.
fn scan_line(line: &str, votes: &mut HashMap<String, VoteCode>) {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let mut i = 0;
    while i + 1 < fields.len() {
        if let Some(code) = VoteCode::parse(fields[i]) {
            let name = fields[i + 1];
            if name.chars().next().map_or(false, char::is_alphabetic) {
                votes.insert(name.to_string(), code);
            }
        }
        i += 2;
    }
}
