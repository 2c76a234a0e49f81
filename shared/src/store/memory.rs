use std::collections::BTreeMap;
use std::ops::Bound;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::UserStore;
use crate::error::StoreError;
use crate::types::{ScanCursor, ScanPage, UserRecord};

/// Table kept in process memory, ordered by `userid`
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    records: RwLock<BTreeMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.records.read().await.len() as u64)
    }

    async fn scan(&self, limit: usize, start: Option<ScanCursor>) -> Result<ScanPage, StoreError> {
        let records = self.records.read().await;
        let lower = match &start {
            Some(cursor) => Bound::Excluded(cursor.userid.clone()),
            None => Bound::Unbounded,
        };

        let mut remaining = records.range((lower, Bound::Unbounded)).map(|(_, r)| r);
        let items: Vec<UserRecord> = remaining.by_ref().take(limit).cloned().collect();

        let next = match (items.last(), remaining.next()) {
            (Some(last), Some(_)) => Some(ScanCursor::new(last.userid.clone())),
            _ => None,
        };

        Ok(ScanPage { items, next })
    }

    async fn get(&self, userid: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.records.read().await.get(userid).cloned())
    }

    async fn put(&self, record: &UserRecord) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .insert(record.userid.clone(), record.clone());
        Ok(())
    }

    async fn delete(&self, userid: &str) -> Result<(), StoreError> {
        self.records.write().await.remove(userid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn record(userid: &str) -> UserRecord {
        UserRecord {
            userid: userid.to_string(),
            timestamp: None,
            attributes: Map::new(),
        }
    }

    async fn seeded(n: usize) -> InMemoryUserStore {
        let store = InMemoryUserStore::new();
        for i in 0..n {
            store.put(&record(&format!("user-{:03}", i))).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_put_overwrites_same_key() {
        let store = InMemoryUserStore::new();
        let mut first = record("a");
        first.attributes.insert("name".into(), "old".into());
        store.put(&first).await.unwrap();

        let mut second = record("a");
        second.attributes.insert("name".into(), "new".into());
        store.put(&second).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(store.get("a").await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_scan_pages_until_exhausted() {
        let store = seeded(5).await;

        let first = store.scan(2, None).await.unwrap();
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.next, Some(ScanCursor::new("user-001")));

        let second = store.scan(2, first.next).await.unwrap();
        assert_eq!(second.items[0].userid, "user-002");

        let third = store.scan(2, second.next).await.unwrap();
        assert_eq!(third.items.len(), 1);
        assert_eq!(third.next, None);
    }

    #[tokio::test]
    async fn test_exact_page_has_no_cursor() {
        let store = seeded(2).await;
        let page = store.scan(2, None).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.next, None);
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let store = seeded(1).await;
        store.delete("nope").await.unwrap();
        store.delete("user-000").await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
        assert_eq!(store.get("user-000").await.unwrap(), None);
    }
}
