//! Bill persistence.

use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{Bill, BillKey};

/// Storage for synchronized bills, keyed by assembly, chamber, and number.
#[async_trait]
pub trait BillStore: Send + Sync {
    /// Look up the stored record for a bill, if any.
    async fn get(&self, key: &BillKey) -> StoreResult<Option<Bill>>;

    /// Insert or replace a bill.
    async fn upsert(&self, bill: &Bill) -> StoreResult<()>;
}

/// In-memory store for tests and one-off runs.
#[derive(Default)]
pub struct MemoryStore {
    bills: RwLock<HashMap<BillKey, Bill>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bills.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bills.read().unwrap().is_empty()
    }

    pub fn clear(&self) {
        self.bills.write().unwrap().clear();
    }
}

#[async_trait]
impl BillStore for MemoryStore {
    async fn get(&self, key: &BillKey) -> StoreResult<Option<Bill>> {
        Ok(self.bills.read().unwrap().get(key).cloned())
    }

    async fn upsert(&self, bill: &Bill) -> StoreResult<()> {
        self.bills
            .write()
            .unwrap()
            .insert(bill.metadata.key(), bill.clone());
        Ok(())
    }
}

/// File-backed store holding the whole data set in memory and writing it
/// back as one JSON document on [`JsonStore::flush`].
pub struct JsonStore {
    path: PathBuf,
    bills: RwLock<HashMap<BillKey, Bill>>,
}

impl JsonStore {
    /// Open a store file, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let bills = match std::fs::read_to_string(&path) {
            Ok(json) => {
                let records: Vec<Bill> = serde_json::from_str(&json)?;
                records
                    .into_iter()
                    .map(|bill| (bill.metadata.key(), bill))
                    .collect()
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            bills: RwLock::new(bills),
        })
    }

    /// Write the full data set back to disk in key order.
    pub fn flush(&self) -> StoreResult<()> {
        let mut records: Vec<Bill> = self.bills.read().unwrap().values().cloned().collect();
        records.sort_by_key(|bill| bill.metadata.key());
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(file, &records)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bills.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bills.read().unwrap().is_empty()
    }
}

#[async_trait]
impl BillStore for JsonStore {
    async fn get(&self, key: &BillKey) -> StoreResult<Option<Bill>> {
        Ok(self.bills.read().unwrap().get(key).cloned())
    }

    async fn upsert(&self, bill: &Bill) -> StoreResult<()> {
        self.bills
            .write()
            .unwrap()
            .insert(bill.metadata.key(), bill.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BillMetadata, Chamber};

    fn bill(number: i64) -> Bill {
        Bill::new(BillMetadata {
            assembly: 101,
            chamber: Chamber::Senate,
            number,
            url: format!("https://example.gov/BillStatus.asp?DocNum={number}"),
        })
    }

    #[tokio::test]
    async fn memory_store_round_trips_bills() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        let recorded = bill(42);
        store.upsert(&recorded).await.unwrap();
        assert_eq!(store.len(), 1);

        let found = store.get(&recorded.metadata.key()).await.unwrap();
        assert_eq!(found, Some(recorded.clone()));

        let mut updated = recorded.clone();
        updated.title = "EDUCATION-TECH".to_string();
        store.upsert(&updated).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(&recorded.metadata.key()).await.unwrap(),
            Some(updated)
        );

        store.clear();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn memory_store_misses_return_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get(&bill(7).metadata.key()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn json_store_persists_across_reopen() {
        let path = std::env::temp_dir().join(format!(
            "billsync-store-test-{}-{}.json",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));

        let store = JsonStore::open(&path).unwrap();
        assert!(store.is_empty());
        store.upsert(&bill(42)).await.unwrap();
        store.upsert(&bill(7)).await.unwrap();
        store.flush().unwrap();

        let reopened = JsonStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
        let found = reopened.get(&bill(42).metadata.key()).await.unwrap();
        assert_eq!(found.unwrap().metadata.number, 42);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn json_store_rejects_malformed_files() {
        let path = std::env::temp_dir().join(format!(
            "billsync-store-corrupt-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{not json").unwrap();
        assert!(JsonStore::open(&path).is_err());
        std::fs::remove_file(&path).unwrap();
    }
}
