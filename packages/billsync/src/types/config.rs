//! Run configuration for a synchronization pass.

/// Parameters for a single synchronization run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Listing URL template with `{assembly}` and `{session}` slots.
    pub listing_url_template: String,
    /// General Assembly number to sync.
    pub assembly: i64,
    /// Session identifier within the assembly.
    pub session: i64,
    /// Maximum number of bill detail pages processed concurrently.
    pub max_concurrency: usize,
}

impl SyncConfig {
    pub fn new(listing_url_template: impl Into<String>, assembly: i64, session: i64) -> Self {
        Self {
            listing_url_template: listing_url_template.into(),
            assembly,
            session,
            max_concurrency: 10,
        }
    }

    pub fn with_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// The concrete listing URL for this assembly and session.
    pub fn listing_url(&self) -> String {
        self.listing_url_template
            .replace("{assembly}", &self.assembly.to_string())
            .replace("{session}", &self.session.to_string())
    }
}
