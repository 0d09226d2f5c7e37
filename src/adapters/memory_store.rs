use crate::domain::model::{GroupField, University, UniversityFilter};
use crate::domain::ports::UniversityStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

/// In-process record store. Records keep insertion order, which is the
/// "store default" order seen by `find`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<University>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<University>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub async fn snapshot(&self) -> Vec<University> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl UniversityStore for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn count(&self, filter: &UniversityFilter) -> Result<u64> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|u| filter.matches(u)).count() as u64)
    }

    async fn distinct(&self, field: GroupField, filter: &UniversityFilter) -> Result<Vec<String>> {
        let records = self.records.read().await;
        let values: BTreeSet<&str> = records
            .iter()
            .filter(|u| filter.matches(u))
            .filter_map(|u| field.value_of(u))
            .collect();
        Ok(values.into_iter().map(str::to_string).collect())
    }

    async fn find(&self, filter: &UniversityFilter, limit: usize) -> Result<Vec<University>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|u| filter.matches(u))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_one(&self, filter: &UniversityFilter) -> Result<Option<University>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|u| filter.matches(u)).cloned())
    }

    async fn group_count(
        &self,
        field: GroupField,
        filter: &UniversityFilter,
    ) -> Result<Vec<(Option<String>, u64)>> {
        let records = self.records.read().await;
        let mut groups: BTreeMap<Option<&str>, u64> = BTreeMap::new();
        for university in records.iter().filter(|u| filter.matches(u)) {
            *groups.entry(field.value_of(university)).or_insert(0) += 1;
        }
        Ok(groups
            .into_iter()
            .map(|(key, count)| (key.map(str::to_string), count))
            .collect())
    }

    async fn insert_many(&self, new_records: Vec<University>) -> Result<u64> {
        let inserted = new_records.len() as u64;
        self.records.write().await.extend(new_records);
        Ok(inserted)
    }
}
