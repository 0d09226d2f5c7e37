use crate::adapters::memory_store::MemoryStore;
use crate::domain::model::{GroupField, University, UniversityFilter};
use crate::domain::ports::{Storage, UniversityStore};
use crate::utils::error::{DirectoryError, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Record store persisted as a JSON snapshot. Reads are served from memory;
/// `insert_many` writes the new snapshot before the records become visible.
pub struct FileStore<S: Storage> {
    storage: S,
    snapshot_file: String,
    inner: MemoryStore,
    write_lock: Mutex<()>,
}

impl<S: Storage> FileStore<S> {
    /// 開啟 snapshot；檔案不存在時視為空的 store
    pub async fn open(storage: S, snapshot_file: impl Into<String>) -> Result<Self> {
        let snapshot_file = snapshot_file.into();

        let records = match storage.read_file(&snapshot_file).await {
            Ok(bytes) => serde_json::from_slice::<Vec<University>>(&bytes).map_err(|e| {
                DirectoryError::store(format!("corrupt snapshot '{}': {}", snapshot_file, e))
            })?,
            Err(DirectoryError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No snapshot at '{}', starting empty", snapshot_file);
                Vec::new()
            }
            Err(e) => {
                return Err(DirectoryError::store(format!(
                    "cannot read snapshot '{}': {}",
                    snapshot_file, e
                )))
            }
        };

        tracing::debug!("Opened store with {} records", records.len());

        Ok(Self {
            storage,
            snapshot_file,
            inner: MemoryStore::with_records(records),
            write_lock: Mutex::new(()),
        })
    }

    async fn persist(&self, records: &[University]) -> Result<()> {
        let data = serde_json::to_vec(records)
            .map_err(|e| DirectoryError::store(format!("cannot encode snapshot: {}", e)))?;
        self.storage
            .write_file(&self.snapshot_file, &data)
            .await
            .map_err(|e| {
                DirectoryError::store(format!(
                    "cannot write snapshot '{}': {}",
                    self.snapshot_file, e
                ))
            })
    }
}

#[async_trait]
impl<S: Storage> UniversityStore for FileStore<S> {
    async fn ping(&self) -> Result<()> {
        self.inner.ping().await
    }

    async fn count(&self, filter: &UniversityFilter) -> Result<u64> {
        self.inner.count(filter).await
    }

    async fn distinct(&self, field: GroupField, filter: &UniversityFilter) -> Result<Vec<String>> {
        self.inner.distinct(field, filter).await
    }

    async fn find(&self, filter: &UniversityFilter, limit: usize) -> Result<Vec<University>> {
        self.inner.find(filter, limit).await
    }

    async fn find_one(&self, filter: &UniversityFilter) -> Result<Option<University>> {
        self.inner.find_one(filter).await
    }

    async fn group_count(
        &self,
        field: GroupField,
        filter: &UniversityFilter,
    ) -> Result<Vec<(Option<String>, u64)>> {
        self.inner.group_count(field, filter).await
    }

    async fn insert_many(&self, records: Vec<University>) -> Result<u64> {
        let _guard = self.write_lock.lock().await;

        let mut next = self.inner.snapshot().await;
        next.extend(records.iter().cloned());
        // snapshot 寫入失敗時記憶體內容保持不變
        self.persist(&next).await?;

        self.inner.insert_many(records).await
    }
}
