use crate::core::{DatasetSource, Pipeline, TransformResult, University, UniversityStore};
use crate::utils::error::{DirectoryError, Result};
use std::sync::Arc;

/// Imports the universities dataset into the record store.
pub struct DatasetPipeline {
    source: Box<dyn DatasetSource>,
    store: Arc<dyn UniversityStore>,
}

impl DatasetPipeline {
    pub fn new(source: Box<dyn DatasetSource>, store: Arc<dyn UniversityStore>) -> Self {
        Self { source, store }
    }
}

#[async_trait::async_trait]
impl Pipeline for DatasetPipeline {
    async fn extract(&self) -> Result<Vec<u8>> {
        tracing::info!("📥 Reading dataset from {}", self.source.describe());
        self.source.fetch().await
    }

    async fn transform(&self, data: Vec<u8>) -> Result<TransformResult> {
        let items: Vec<serde_json::Value> = serde_json::from_slice(&data).map_err(|e| {
            DirectoryError::dataset(format!("dataset is not a JSON array of records: {}", e))
        })?;

        let mut result = TransformResult::default();
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<University>(item) {
                Ok(university) if university.is_valid() => result.records.push(university),
                Ok(_) => {
                    tracing::debug!("Rejecting record #{}: empty name or country", index);
                    result.rejected += 1;
                }
                Err(e) => {
                    tracing::debug!("Rejecting record #{}: {}", index, e);
                    result.rejected += 1;
                }
            }
        }

        if result.rejected > 0 {
            tracing::warn!("⚠️ Rejected {} invalid dataset records", result.rejected);
        }

        Ok(result)
    }

    async fn load(&self, result: TransformResult) -> Result<u64> {
        if result.records.is_empty() {
            return Ok(0);
        }
        self.store.insert_many(result.records).await
    }
}
