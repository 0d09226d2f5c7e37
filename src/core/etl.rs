use crate::core::{Pipeline, UniversityFilter, UniversityStore};
use crate::utils::error::Result;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    AlreadySeeded { existing: u64 },
    Imported { inserted: u64, rejected: usize },
}

/// Runs the import pipeline once per empty store.
pub struct SeedEngine<P: Pipeline> {
    pipeline: P,
    store: Arc<dyn UniversityStore>,
}

impl<P: Pipeline> SeedEngine<P> {
    pub fn new(pipeline: P, store: Arc<dyn UniversityStore>) -> Self {
        Self { pipeline, store }
    }

    /// Idempotent: a store holding any record is left untouched and the
    /// dataset is never read.
    pub async fn ensure_seeded(&self) -> Result<SeedOutcome> {
        let existing = self.store.count(&UniversityFilter::all()).await?;
        if existing > 0 {
            tracing::info!("✓ Store already has {} universities", existing);
            return Ok(SeedOutcome::AlreadySeeded { existing });
        }

        // Extract
        let raw_data = self.pipeline.extract().await?;
        tracing::debug!("Extracted {} bytes", raw_data.len());

        // Transform
        let transformed = self.pipeline.transform(raw_data).await?;
        let rejected = transformed.rejected;
        tracing::info!(
            "Importing {} universities ({} rejected)",
            transformed.records.len(),
            rejected
        );

        // Load
        let inserted = self.pipeline.load(transformed).await?;
        tracing::info!("✓ Imported {} universities into the store", inserted);

        Ok(SeedOutcome::Imported { inserted, rejected })
    }
}
