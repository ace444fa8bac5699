//! Per-bill synchronization.
//!
//! One call to [`process_bill`] brings a single bill up to date: fetch the
//! detail page, refresh the descriptive fields, and, when the actions table
//! changed since the stored record, rebuild the action list and everything
//! derived from it. Vote and full-text fetches are the expensive part and
//! only happen when the new actions call for them or the bill is new.

use std::sync::Arc;

use tracing::warn;
use url::Url;

use crate::categories::CategoryMap;
use crate::classify::classify;
use crate::detect;
use crate::error::BillError;
use crate::fetch::PageFetcher;
use crate::parse::detail::{committee_id_from_href, parse_detail_page, ParsedAction};
use crate::parse::{fulltext, rollcall};
use crate::progress::{current_stage, notification_for, refresh_flags};
use crate::store::BillStore;
use crate::types::{
    ActionTag, Bill, BillAction, BillCategory, BillFullText, BillMetadata, BillVoteEvent,
    Notification,
};

/// Collaborators shared by every bill in a run.
pub(crate) struct SyncContext {
    pub fetcher: Arc<dyn PageFetcher>,
    pub store: Arc<dyn BillStore>,
    pub categories: Arc<CategoryMap>,
}

/// The updated record for one bill, plus the notification its new actions
/// produced, if any.
pub(crate) struct BillOutcome {
    pub bill: Bill,
    pub notification: Option<Notification>,
}

pub(crate) async fn process_bill(ctx: &SyncContext, url: Url) -> Result<BillOutcome, BillError> {
    let metadata = BillMetadata::from_detail_url(&url)?;

    let previous = match ctx.store.get(&metadata.key()).await {
        Ok(previous) => previous,
        Err(err) => {
            warn!(url = %url, error = %err, "store lookup failed, treating bill as new");
            None
        }
    };
    let known = previous.is_some();
    let mut bill = previous.unwrap_or_else(|| Bill::new(metadata.clone()));

    let html = ctx.fetcher.fetch_html(url.as_str()).await?;
    let page = parse_detail_page(&html);

    let fingerprint = detect::fingerprint(&page.actions_text);
    let changed = bill.actions_fingerprint != fingerprint;

    // Descriptive fields refresh on every visit, whether or not the actions
    // table moved.
    bill.metadata = metadata;
    bill.title = page.title;
    bill.short_summary = page.short_summary;
    bill.full_summary = page.full_summary;
    bill.sponsor_ids = page.sponsors.ids;
    bill.chief_sponsor = page.sponsors.chief;
    bill.house_primary_sponsor = page.sponsors.house_primary;
    bill.senate_primary_sponsor = page.sponsors.senate_primary;

    let mut notification = None;
    if changed || !known {
        let (actions, category, committee_id) = resolve_actions(page.actions, &ctx.categories);

        // Both comparisons run against the stored action list before it is
        // replaced.
        let flags = refresh_flags(bill.actions.len(), &actions);
        notification = notification_for(&bill.metadata, &bill.actions, &actions);
        bill.viewable = current_stage(&actions).stage.is_viewable();

        bill.actions = actions;
        bill.actions_fingerprint = fingerprint;
        bill.category = category;
        bill.committee_id = committee_id;
        bill.created = bill.actions.first().and_then(|first| first.date);

        if flags.full_text || !known {
            refresh_full_text(ctx, &mut bill, &url).await;
        }
        if flags.votes || !known {
            bill.vote_events = collect_votes(ctx, &url, page.votes_href.as_deref()).await;
        }
    }

    Ok(BillOutcome { bill, notification })
}

/// Classify the parsed actions and resolve the bill's category from its
/// committee assignments. Every assignment overwrites, so a re-referred
/// bill carries its latest committee.
fn resolve_actions(
    parsed: Vec<ParsedAction>,
    categories: &CategoryMap,
) -> (Vec<BillAction>, BillCategory, String) {
    let mut category = BillCategory::Unclassified;
    let mut committee_id = String::new();
    let mut actions = Vec::with_capacity(parsed.len());
    for action in parsed {
        let tag = classify(&action.description);
        if tag == ActionTag::CommitteeAssigned {
            match action
                .committee_href
                .as_deref()
                .and_then(committee_id_from_href)
            {
                Some(id) => {
                    category = categories.resolve(&id);
                    committee_id = id;
                }
                None => {
                    category = BillCategory::Unclassified;
                    committee_id = String::new();
                }
            }
        }
        actions.push(BillAction {
            date: action.date,
            chamber: action.chamber,
            description: action.description,
            tag,
        });
    }
    (actions, category, committee_id)
}

/// Fetch and store the bill's full text. The full-text link is recorded
/// even when the fetch fails, so the stored record always points at the
/// right page.
async fn refresh_full_text(ctx: &SyncContext, bill: &mut Bill, detail_url: &Url) {
    let path = format!(
        "/legislation/{assembly}/{doc_type}/{assembly}00{doc_type}{number:04}.htm",
        assembly = bill.metadata.assembly,
        doc_type = bill.metadata.chamber.doc_type(),
        number = bill.metadata.number,
    );
    let full_text_url = match detail_url.join(&path) {
        Ok(url) => url,
        Err(err) => {
            warn!(url = %detail_url, error = %err, "full text link does not resolve");
            return;
        }
    };
    let full_text = match ctx.fetcher.fetch_html(full_text_url.as_str()).await {
        Ok(html) => fulltext::extract_full_text(&html),
        Err(err) => {
            warn!(url = %full_text_url, error = %err, "full text fetch failed");
            String::new()
        }
    };
    bill.full_text = BillFullText {
        url: full_text_url.to_string(),
        full_text,
    };
}

/// Walk the vote history page and parse each linked roll-call PDF. Rows
/// that fail to resolve, fetch, or parse are skipped so one bad document
/// does not cost the bill its other votes.
async fn collect_votes(
    ctx: &SyncContext,
    detail_url: &Url,
    votes_href: Option<&str>,
) -> Vec<BillVoteEvent> {
    let Some(href) = votes_href else {
        return Vec::new();
    };
    let history_url = match detail_url.join(href) {
        Ok(url) => url,
        Err(err) => {
            warn!(url = %detail_url, href = %href, error = %err, "vote history link does not resolve");
            return Vec::new();
        }
    };
    let html = match ctx.fetcher.fetch_html(history_url.as_str()).await {
        Ok(html) => html,
        Err(err) => {
            warn!(url = %history_url, error = %err, "vote history fetch failed");
            return Vec::new();
        }
    };

    let mut events = Vec::new();
    for link in rollcall::vote_links(&html) {
        let pdf_url = match history_url.join(&link.href) {
            Ok(url) => url,
            Err(err) => {
                warn!(href = %link.href, error = %err, "dropping roll call link that does not resolve");
                continue;
            }
        };
        let bytes = match ctx.fetcher.fetch_bytes(pdf_url.as_str()).await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(url = %pdf_url, error = %err, "roll call fetch failed");
                continue;
            }
        };
        match rollcall::parse_roll_call(&bytes) {
            Ok(votes) => events.push(BillVoteEvent {
                chamber: link.chamber.to_lowercase(),
                votes,
            }),
            Err(err) => {
                warn!(url = %pdf_url, error = %err, "roll call does not parse");
            }
        }
    }
    events
}
