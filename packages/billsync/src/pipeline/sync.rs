//! Run orchestration.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tracing::{info, warn};
use url::Url;

use super::detail::{process_bill, BillOutcome, SyncContext};
use crate::categories::CategoryMap;
use crate::error::SyncError;
use crate::fetch::PageFetcher;
use crate::notify::NotificationSink;
use crate::parse::listing::bill_links;
use crate::store::BillStore;
use crate::types::{Bill, BillKey, Notification, SyncConfig};

/// Synchronizes every bill in one assembly session.
pub struct BillSyncer {
    ctx: Arc<SyncContext>,
    sink: Arc<dyn NotificationSink>,
    config: SyncConfig,
}

/// What one run accomplished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub bills_synced: usize,
    pub bills_failed: usize,
    pub notifications: usize,
    pub delivery: DeliveryStatus,
}

/// Whether the notification batch reached the sink. Delivery failures do
/// not fail the run; bills are already persisted by the time delivery is
/// attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sent,
    Failed(String),
}

impl BillSyncer {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        store: Arc<dyn BillStore>,
        sink: Arc<dyn NotificationSink>,
        categories: CategoryMap,
        config: SyncConfig,
    ) -> Self {
        Self {
            ctx: Arc::new(SyncContext {
                fetcher,
                store,
                categories: Arc::new(categories),
            }),
            sink,
            config,
        }
    }

    /// Fetch the session listing, synchronize every bill on it, persist the
    /// results, and deliver the notifications the run produced.
    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        let listing_url = Url::parse(&self.config.listing_url())?;
        info!(url = %listing_url, "fetching bill listing");
        let html = self
            .ctx
            .fetcher
            .fetch_html(listing_url.as_str())
            .await
            .map_err(SyncError::Listing)?;
        let links = bill_links(&html, &listing_url);
        info!(
            bills = links.len(),
            concurrency = self.config.max_concurrency,
            "starting bill synchronization"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency));
        let (tx, mut rx) = mpsc::unbounded_channel();
        for link in links {
            let ctx = Arc::clone(&self.ctx);
            let semaphore = Arc::clone(&semaphore);
            let tx = tx.clone();
            tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire().await else {
                    return;
                };
                let _ = tx.send(process_bill(&ctx, link).await);
            });
        }
        drop(tx);

        // Listings occasionally repeat a bill; keying by bill identity keeps
        // the last outcome.
        let mut bills: HashMap<BillKey, Bill> = HashMap::new();
        let mut notifications: Vec<Notification> = Vec::new();
        let mut failed = 0;
        let mut completed = 0;
        while let Some(result) = rx.recv().await {
            match result {
                Ok(BillOutcome { bill, notification }) => {
                    completed += 1;
                    info!(
                        number = bill.metadata.number,
                        chamber = bill.metadata.chamber.doc_type(),
                        completed,
                        "bill synchronized"
                    );
                    notifications.extend(notification);
                    bills.insert(bill.metadata.key(), bill);
                }
                Err(err) => {
                    failed += 1;
                    warn!(error = %err, "bill skipped");
                }
            }
        }

        let mut synced = 0;
        for bill in bills.values() {
            match self.ctx.store.upsert(bill).await {
                Ok(()) => synced += 1,
                Err(err) => {
                    failed += 1;
                    warn!(number = bill.metadata.number, error = %err, "failed to persist bill");
                }
            }
        }
        info!(bills = synced, "bills persisted");

        // The batch is posted even when empty; the receiving service uses it
        // as a run heartbeat.
        info!(count = notifications.len(), "delivering notifications");
        let delivery = match self.sink.deliver(&notifications).await {
            Ok(()) => DeliveryStatus::Sent,
            Err(err) => {
                warn!(error = %err, "notification delivery failed");
                DeliveryStatus::Failed(err.to_string())
            }
        };

        Ok(SyncReport {
            bills_synced: synced,
            bills_failed: failed,
            notifications: notifications.len(),
            delivery,
        })
    }
}
