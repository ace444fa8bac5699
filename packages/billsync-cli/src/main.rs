//! Synchronize one assembly session from the command line.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use billsync::{
    BillSyncer, CategoryMap, DeliveryStatus, HttpFetcher, HttpNotifier, JsonStore, SyncConfig,
};

#[derive(Parser)]
#[command(name = "billsync")]
#[command(about = "Synchronize legislative bills from the state tracker")]
struct Cli {
    /// General Assembly number to synchronize
    #[arg(long)]
    assembly: i64,

    /// Session identifier within the assembly
    #[arg(long)]
    session: i64,

    /// Listing URL template with {assembly} and {session} slots
    #[arg(long)]
    listing_url: String,

    /// Notification endpoint; falls back to BILLSYNC_NOTIFY_URL
    #[arg(long)]
    notify_url: Option<String>,

    /// Committee category configuration
    #[arg(long, default_value = "categories.json")]
    categories: PathBuf,

    /// Bill store file
    #[arg(long, default_value = "bills.json")]
    store: PathBuf,

    /// Maximum concurrent bill fetches
    #[arg(long, default_value_t = 10)]
    concurrency: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,billsync=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let notify_url = cli
        .notify_url
        .or_else(|| std::env::var("BILLSYNC_NOTIFY_URL").ok())
        .context("notification endpoint not set (--notify-url or BILLSYNC_NOTIFY_URL)")?;

    let categories = CategoryMap::load(&cli.categories)
        .with_context(|| format!("failed to load categories from {}", cli.categories.display()))?;
    let store = Arc::new(
        JsonStore::open(&cli.store)
            .with_context(|| format!("failed to open bill store {}", cli.store.display()))?,
    );
    let fetcher = Arc::new(HttpFetcher::new().context("failed to build HTTP client")?);
    let sink = Arc::new(HttpNotifier::new(notify_url));

    let config = SyncConfig::new(cli.listing_url, cli.assembly, cli.session)
        .with_concurrency(cli.concurrency);
    let syncer = BillSyncer::new(fetcher, store.clone(), sink, categories, config);

    let report = syncer.run().await.context("bill synchronization failed")?;
    store.flush().context("failed to write bill store")?;

    info!(
        bills = report.bills_synced,
        failed = report.bills_failed,
        notifications = report.notifications,
        "run complete"
    );
    if let DeliveryStatus::Failed(reason) = report.delivery {
        warn!(reason = %reason, "notifications were not delivered");
    }

    Ok(())
}
