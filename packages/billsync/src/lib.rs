//! Incremental Legislative Bill Synchronization
//!
//! Mirrors one General Assembly session from the state tracker site into a
//! local store, fetching only what changed since the last run. The actions
//! table on each bill's detail page is fingerprinted; when the fingerprint
//! is unchanged the bill's expensive follow-ups (roll-call PDFs, full bill
//! text) are skipped entirely.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use billsync::{BillSyncer, CategoryMap, HttpFetcher, HttpNotifier, JsonStore, SyncConfig};
//!
//! let fetcher = Arc::new(HttpFetcher::new()?);
//! let store = Arc::new(JsonStore::open("bills.json")?);
//! let sink = Arc::new(HttpNotifier::new("https://example.org/notify"));
//! let categories = CategoryMap::load("categories.json".as_ref())?;
//!
//! let config = SyncConfig::new(
//!     "https://www.ilga.gov/legislation/grplist.asp?num1=1&num2=9999&DocTypeID=SB&GA={assembly}&SessionId={session}",
//!     101,
//!     100,
//! );
//! let syncer = BillSyncer::new(fetcher, store.clone(), sink, categories, config);
//! let report = syncer.run().await?;
//! store.flush()?;
//! ```
//!
//! # Modules
//!
//! - [`types`] - Bill records, actions, votes, notifications
//! - [`parse`] - HTML and PDF parsers for the tracker's page formats
//! - [`classify`] - Action description classification
//! - [`progress`] - Life-cycle tracking and notification rules
//! - [`pipeline`] - The synchronization pipeline itself
//! - [`store`] - Persistence (in-memory and JSON file)
//! - [`testing`] - Mock fetcher, mock sink, roll-call PDF builder

pub mod categories;
pub mod classify;
pub mod detect;
pub mod error;
pub mod fetch;
pub mod notify;
pub mod parse;
pub mod pipeline;
pub mod progress;
pub mod store;
pub mod testing;
pub mod types;

// Re-export the run surface at the crate root
pub use categories::CategoryMap;
pub use error::{
    BillError, CategoryError, FetchError, NotifyError, RollCallError, StoreError, SyncError,
};
pub use fetch::{HttpFetcher, PageFetcher};
pub use notify::{HttpNotifier, NotificationSink};
pub use pipeline::{BillSyncer, DeliveryStatus, SyncReport};
pub use store::{BillStore, JsonStore, MemoryStore};
pub use types::{
    ActionTag, Bill, BillAction, BillCategory, BillFullText, BillKey, BillMetadata, BillVoteEvent,
    Chamber, Notification, SyncConfig, VoteCode,
};
