//! Typed errors for the bill synchronization library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can match
//! on the failure layer: run-fatal, bill-local, or field-local.

use thiserror::Error;

/// Errors that abort an entire synchronization run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The bill listing page could not be fetched
    #[error("listing fetch failed: {0}")]
    Listing(#[source] FetchError),

    /// The configured listing URL is not a valid URL
    #[error("invalid listing URL: {0}")]
    ListingUrl(#[from] url::ParseError),
}

/// Errors that skip a single bill and let the rest of the run proceed.
#[derive(Debug, Error)]
pub enum BillError {
    /// Required metadata could not be derived from the detail URL
    #[error("missing {field} in detail URL: {url}")]
    Metadata { field: &'static str, url: String },

    /// The detail page fetch failed even after its retry
    #[error("detail fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

/// HTTP fetch failures.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
}

/// Storage failures. "Bill not found" is not an error; stores return
/// `Ok(None)` for an ordinary miss.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be read or written
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Notification delivery failures.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Transport-level failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("notification endpoint returned {status}")]
    Status { status: reqwest::StatusCode },
}

/// Category lookup file failures.
#[derive(Debug, Error)]
pub enum CategoryError {
    /// The lookup file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The lookup file is not the expected `{label: [ids]}` shape
    #[error("invalid category file: {0}")]
    Format(#[from] serde_json::Error),
}

/// Roll-call PDF failures. Non-fatal for the vote event that hit them.
#[derive(Debug, Error)]
pub enum RollCallError {
    /// The document could not be parsed as a PDF
    #[error("PDF parse error: {0}")]
    Pdf(#[from] lopdf::Error),
}

/// Result alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result alias for notification delivery.
pub type NotifyResult<T> = std::result::Result<T, NotifyError>;
