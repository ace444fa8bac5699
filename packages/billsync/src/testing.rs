//! Test doubles for exercising the pipeline without touching the network.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use reqwest::StatusCode;

use crate::error::{FetchError, FetchResult, NotifyError, NotifyResult};
use crate::fetch::PageFetcher;
use crate::notify::NotificationSink;
use crate::types::Notification;

/// One recorded fetch, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchCall {
    Html { url: String },
    Bytes { url: String },
}

/// [`PageFetcher`] serving canned pages and documents. Unknown URLs come
/// back as 404s and URLs registered with [`MockFetcher::fail_url`] as 500s,
/// so failure paths are as easy to stage as success paths.
#[derive(Default, Clone)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, String>>>,
    documents: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    fail_urls: Arc<RwLock<Vec<String>>>,
    calls: Arc<RwLock<Vec<FetchCall>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(url.into(), html.into());
        self
    }

    pub fn with_document(self, url: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.documents.write().unwrap().insert(url.into(), bytes);
        self
    }

    pub fn fail_url(self, url: impl Into<String>) -> Self {
        self.fail_urls.write().unwrap().push(url.into());
        self
    }

    /// Replace a page in place, for staging changes between runs.
    pub fn set_page(&self, url: impl Into<String>, html: impl Into<String>) {
        self.pages.write().unwrap().insert(url.into(), html.into());
    }

    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch_html(&self, url: &str) -> FetchResult<String> {
        self.calls.write().unwrap().push(FetchCall::Html {
            url: url.to_string(),
        });
        if self.fail_urls.read().unwrap().iter().any(|u| u == url) {
            return Err(FetchError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                url: url.to_string(),
            });
        }
        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                status: StatusCode::NOT_FOUND,
                url: url.to_string(),
            })
    }

    async fn fetch_bytes(&self, url: &str) -> FetchResult<Vec<u8>> {
        self.calls.write().unwrap().push(FetchCall::Bytes {
            url: url.to_string(),
        });
        if self.fail_urls.read().unwrap().iter().any(|u| u == url) {
            return Err(FetchError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                url: url.to_string(),
            });
        }
        self.documents
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                status: StatusCode::NOT_FOUND,
                url: url.to_string(),
            })
    }
}

/// [`NotificationSink`] that records every batch it is handed.
#[derive(Default, Clone)]
pub struct MockSink {
    deliveries: Arc<RwLock<Vec<Vec<Notification>>>>,
    failing: bool,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose deliveries are recorded but reported as failed.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn deliveries(&self) -> Vec<Vec<Notification>> {
        self.deliveries.read().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for MockSink {
    async fn deliver(&self, notifications: &[Notification]) -> NotifyResult<()> {
        self.deliveries.write().unwrap().push(notifications.to_vec());
        if self.failing {
            return Err(NotifyError::Status {
                status: StatusCode::BAD_GATEWAY,
            });
        }
        Ok(())
    }
}

/// Build a one-page PDF printing `lines` top to bottom, the way roll-call
/// documents lay out their vote columns.
pub fn roll_call_pdf(lines: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 10.into()]),
    ];
    let mut y = 760;
    for line in lines {
        operations.push(Operation::new(
            "Tm",
            vec![1.into(), 0.into(), 0.into(), 1.into(), 72.into(), y.into()],
        ));
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        y -= 14;
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("roll call content encodes"),
    ));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("roll call pdf serializes");
    bytes
}
