use crate::domain::model::{GroupField, TransformResult, University, UniversityFilter};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// The record store both services query. Implementations must never mutate
/// records outside `insert_many`.
#[async_trait]
pub trait UniversityStore: Send + Sync {
    async fn ping(&self) -> Result<()>;
    async fn count(&self, filter: &UniversityFilter) -> Result<u64>;
    /// Distinct non-empty values of `field`, ascending.
    async fn distinct(&self, field: GroupField, filter: &UniversityFilter) -> Result<Vec<String>>;
    async fn find(&self, filter: &UniversityFilter, limit: usize) -> Result<Vec<University>>;
    async fn find_one(&self, filter: &UniversityFilter) -> Result<Option<University>>;
    /// Record counts per value of `field`; `None` groups records lacking the field.
    async fn group_count(
        &self,
        field: GroupField,
        filter: &UniversityFilter,
    ) -> Result<Vec<(Option<String>, u64)>>;
    async fn insert_many(&self, records: Vec<University>) -> Result<u64>;
}

#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<u8>>;
    fn describe(&self) -> String;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<u8>>;
    async fn transform(&self, data: Vec<u8>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<u64>;
}
