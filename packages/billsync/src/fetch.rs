//! HTTP page fetching.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap};
use reqwest::Client;
use tracing::debug;

use crate::error::{FetchError, FetchResult};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Retrieves pages and binary documents from the tracker site.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a page and return its body as text.
    async fn fetch_html(&self, url: &str) -> FetchResult<String>;

    /// Fetch a binary document such as a roll-call PDF.
    async fn fetch_bytes(&self, url: &str) -> FetchResult<Vec<u8>>;
}

/// [`PageFetcher`] backed by a shared reqwest client configured to look like
/// a regular browser. The tracker site serves stripped-down pages to clients
/// without browser headers.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> FetchResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8"
                .parse()
                .unwrap(),
        );
        headers.insert(header::ACCEPT_LANGUAGE, "en-US,en;q=0.5".parse().unwrap());
        headers.insert(header::CONNECTION, "keep-alive".parse().unwrap());
        headers.insert(header::UPGRADE_INSECURE_REQUESTS, "1".parse().unwrap());

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(20))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }

    /// One immediate retry per request, whether the failure was transport
    /// level or a non-success status; the tracker site drops connections
    /// often enough that a second attempt usually succeeds.
    async fn get(&self, url: &str) -> FetchResult<reqwest::Response> {
        match self.try_get(url).await {
            Ok(response) => Ok(response),
            Err(err) => {
                debug!(url = %url, error = %err, "request failed, retrying once");
                self.try_get(url).await
            }
        }
    }

    async fn try_get(&self, url: &str) -> FetchResult<reqwest::Response> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_html(&self, url: &str) -> FetchResult<String> {
        debug!(url = %url, "fetching page");
        Ok(self.get(url).await?.text().await?)
    }

    async fn fetch_bytes(&self, url: &str) -> FetchResult<Vec<u8>> {
        debug!(url = %url, "fetching document");
        Ok(self.get(url).await?.bytes().await?.to_vec())
    }
}
