//! Data model for bills, actions, votes, and notifications.

pub mod action;
pub mod bill;
pub mod config;
pub mod notification;
pub mod vote;

pub use action::{ActionTag, BillAction};
pub use bill::{Bill, BillCategory, BillFullText, BillKey, BillMetadata, Chamber};
pub use config::SyncConfig;
pub use notification::Notification;
pub use vote::{BillVoteEvent, VoteCode};
