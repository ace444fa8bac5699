//! The synchronization pipeline: listing fan-out, per-bill processing,
//! persistence, and notification delivery.

mod detail;
mod sync;

pub use sync::{BillSyncer, DeliveryStatus, SyncReport};
