//! Notification delivery.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::error::{NotifyError, NotifyResult};
use crate::types::Notification;

/// Receives the batch of notifications produced by a run.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver one run's notifications. Called once per run, with an empty
    /// slice when nothing changed.
    async fn deliver(&self, notifications: &[Notification]) -> NotifyResult<()>;
}

#[derive(Serialize)]
struct NotificationBatch<'a> {
    notifications: &'a [Notification],
}

/// [`NotificationSink`] that posts the batch as JSON to a webhook.
pub struct HttpNotifier {
    client: Client,
    endpoint: String,
}

impl HttpNotifier {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl NotificationSink for HttpNotifier {
    async fn deliver(&self, notifications: &[Notification]) -> NotifyResult<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&NotificationBatch { notifications })
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status { status });
        }
        Ok(())
    }
}
