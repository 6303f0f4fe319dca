//! Collaborator implementations backed by [`Storage`]

use super::{queries, Storage};
use crate::error::{Error, Result};
use crate::ports::{KeyValueStore, ThreadStore};
use crate::types::{StoredThread, ThreadSummary};
use async_trait::async_trait;
use tracing::debug;

const DEFAULT_PAGE_SIZE: usize = 100;

/// `ThreadStore` over the `threads` table
#[derive(Clone)]
pub struct SqliteThreadStore {
    storage: Storage,
    page_size: usize,
}

impl SqliteThreadStore {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Limit how many threads a listing returns
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Store a new thread
    pub async fn insert(&self, thread: StoredThread) -> Result<()> {
        self.blocking(move |storage| {
            let conn = storage.connection()?;
            queries::insert_thread(&conn, &thread)
        })
        .await
    }

    /// Run a blocking closure on the blocking pool
    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(Storage) -> Result<T> + Send + 'static,
    {
        let storage = self.storage.clone();
        tokio::task::spawn_blocking(move || f(storage))
            .await
            .map_err(|e| Error::Internal(format!("Storage task failed: {}", e)))?
    }
}

#[async_trait]
impl ThreadStore for SqliteThreadStore {
    async fn list_threads(&self) -> Result<Vec<ThreadSummary>> {
        let limit = self.page_size;
        let threads = self
            .blocking(move |storage| {
                let conn = storage.connection()?;
                queries::list_threads(&conn, limit, 0)
            })
            .await?;

        debug!("Listed {} threads", threads.len());
        Ok(threads.iter().map(ThreadSummary::from).collect())
    }

    async fn delete_thread(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        self.blocking(move |storage| {
            let conn = storage.connection()?;
            queries::delete_thread(&conn, &id)
        })
        .await
    }
}

/// `KeyValueStore` over the `settings` table
#[derive(Clone)]
pub struct SqliteSettings {
    storage: Storage,
}

impl SqliteSettings {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

impl KeyValueStore for SqliteSettings {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.storage.connection()?;
        queries::get_setting(&conn, key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.storage.connection()?;
        queries::set_setting(&conn, key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use pretty_assertions::assert_eq;

    fn store() -> SqliteThreadStore {
        SqliteThreadStore::new(Storage::in_memory().unwrap())
    }

    #[tokio::test]
    async fn test_list_derives_previews() {
        let store = store();
        store
            .insert(StoredThread::with_id("bare", None))
            .await
            .unwrap();
        store
            .insert(StoredThread::from_first_message("Summarise the notes"))
            .await
            .unwrap();

        let mut previews: Vec<String> = store
            .list_threads()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.preview_text)
            .collect();
        previews.sort();

        assert_eq!(previews, vec!["Summarise the notes", "bare"]);
    }

    #[tokio::test]
    async fn test_delete_through_store() {
        let store = store();
        store.insert(StoredThread::with_id("t-1", None)).await.unwrap();

        store.delete_thread("t-1").await.unwrap();
        assert!(store.list_threads().await.unwrap().is_empty());

        let err = store.delete_thread("t-1").await.unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_page_size_limits_listing() {
        let store = store().with_page_size(2);
        for i in 0..3 {
            store
                .insert(StoredThread::with_id(format!("t-{}", i), None))
                .await
                .unwrap();
        }
        assert_eq!(store.list_threads().await.unwrap().len(), 2);
    }

    #[test]
    fn test_settings_store() {
        let settings = SqliteSettings::new(Storage::in_memory().unwrap());
        assert_eq!(settings.get("threadHistoryPanelWidth").unwrap(), None);

        settings.set("threadHistoryPanelWidth", "275").unwrap();
        assert_eq!(
            settings.get("threadHistoryPanelWidth").unwrap().as_deref(),
            Some("275")
        );
    }
}
