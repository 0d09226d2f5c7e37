use crate::domain::model::{GroupField, ProvinceFilter, QueryLimits, University, UniversityFilter};
use crate::domain::ports::UniversityStore;
use crate::utils::error::{DirectoryError, Result};
use regex::RegexBuilder;
use std::sync::Arc;

/// Read operations behind the search UI.
pub struct QueryService {
    store: Arc<dyn UniversityStore>,
    limits: QueryLimits,
}

impl QueryService {
    pub fn new(store: Arc<dyn UniversityStore>, limits: QueryLimits) -> Self {
        Self { store, limits }
    }

    pub async fn list_countries(&self) -> Result<Vec<String>> {
        let mut countries = self
            .store
            .distinct(GroupField::Country, &UniversityFilter::all())
            .await?;
        countries.sort();
        Ok(countries)
    }

    pub async fn list_provinces(&self, country: &str) -> Result<Vec<String>> {
        let mut provinces = self
            .store
            .distinct(GroupField::StateProvince, &UniversityFilter::by_country(country))
            .await?;
        provinces.retain(|p| !p.is_empty());
        provinces.sort();
        Ok(provinces)
    }

    /// Empty filter values behave like absent ones.
    pub async fn list_universities(
        &self,
        country: Option<&str>,
        province: Option<&str>,
    ) -> Result<Vec<University>> {
        let filter = UniversityFilter {
            country: country.filter(|c| !c.is_empty()).map(str::to_string),
            province: match province.filter(|p| !p.is_empty()) {
                Some(p) => ProvinceFilter::Equals(p.to_string()),
                None => ProvinceFilter::Any,
            },
            ..UniversityFilter::default()
        };

        self.store.find(&filter, self.limits.list_limit).await
    }

    pub async fn get_university_by_name(&self, name: &str) -> Result<University> {
        self.store
            .find_one(&UniversityFilter::by_name(name))
            .await?
            .ok_or_else(|| DirectoryError::not_found("University not found"))
    }

    /// Case-insensitive substring match on the name. The query is taken
    /// literally, regex metacharacters included.
    pub async fn search_universities(&self, query: Option<&str>) -> Result<Vec<University>> {
        let query = match query {
            Some(q) if !q.is_empty() => q,
            _ => return Err(DirectoryError::validation("Search query required")),
        };

        let pattern = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
            .map_err(|e| DirectoryError::validation(format!("Invalid search query: {}", e)))?;

        tracing::debug!("Searching universities for '{}'", query);
        self.store
            .find(
                &UniversityFilter::name_matching(pattern),
                self.limits.search_limit,
            )
            .await
    }
}
