//! In-memory [`AnimeStore`] used by tests and offline tooling.

use super::{AnimeStore, StoreError};
use crate::models::anime::{AnimeRecord, NewAnime};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryStore {
    records: RwLock<Vec<AnimeRecord>>,
    offline: AtomicBool,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from existing rows. Rows are kept sorted by id so the
    /// title scan honours the store contract.
    #[must_use]
    pub fn with_records(mut records: Vec<AnimeRecord>) -> Self {
        records.sort_by_key(|r| r.id);
        Self {
            records: RwLock::new(records),
            offline: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent call fail with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory store is offline".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl AnimeStore for InMemoryStore {
    async fn get_by_id(&self, id: i32) -> Result<Option<AnimeRecord>, StoreError> {
        self.check_online()?;
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn get_by_title(&self, title: &str) -> Result<Option<AnimeRecord>, StoreError> {
        self.check_online()?;
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.title == title).cloned())
    }

    async fn list_all_titles(&self) -> Result<Vec<(i32, String)>, StoreError> {
        self.check_online()?;
        let records = self.records.read().await;
        Ok(records.iter().map(|r| (r.id, r.title.clone())).collect())
    }

    async fn insert(&self, anime: NewAnime) -> Result<AnimeRecord, StoreError> {
        self.check_online()?;
        let mut records = self.records.write().await;
        let id = records.last().map_or(1, |r| r.id + 1);
        let record = AnimeRecord::from_new(id, anime);
        records.push(record.clone());
        Ok(record)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = InMemoryStore::new();
        let first = store.insert(NewAnime::titled("Kino's Journey")).await.unwrap();
        let second = store.insert(NewAnime::titled("Planetes")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let titles = store.list_all_titles().await.unwrap();
        assert_eq!(
            titles,
            vec![(1, "Kino's Journey".to_string()), (2, "Planetes".to_string())]
        );
    }

    #[tokio::test]
    async fn offline_store_reports_unavailable() {
        let store = InMemoryStore::new();
        store.set_offline(true);
        assert!(matches!(
            store.get_by_id(1).await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
