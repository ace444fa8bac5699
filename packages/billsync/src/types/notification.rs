//! Subscriber notifications produced within one run.

use serde::{Deserialize, Serialize};

use crate::types::bill::BillMetadata;

/// A life-cycle update for one bill. Ephemeral: produced by the progress
/// tracker and consumed by the notification sink in the same run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub bill_info: BillMetadata,
    pub text: String,
}
