use crate::domain::model::{
    CountryCount, CountryDetail, CountryDistribution, DistributionStats, GroupField,
    OverviewStats, ProvinceBreakdown, ProvinceCount, ProvinceFilter, QueryLimits, UniversityFilter,
    WebsitePresence,
};
use crate::domain::ports::UniversityStore;
use crate::utils::error::Result;
use std::cmp::Reverse;
use std::sync::Arc;

/// Aggregates behind the analytics dashboard. Every call is computed from the
/// store at request time.
pub struct AnalyticsService {
    store: Arc<dyn UniversityStore>,
    limits: QueryLimits,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn UniversityStore>, limits: QueryLimits) -> Self {
        Self { store, limits }
    }

    pub async fn overview_stats(&self) -> Result<OverviewStats> {
        let all = UniversityFilter::all();
        let total_universities = self.store.count(&all).await?;
        let total_countries = self.store.distinct(GroupField::Country, &all).await?.len() as u64;
        let total_provinces = self
            .store
            .distinct(GroupField::StateProvince, &all)
            .await?
            .len() as u64;

        Ok(OverviewStats {
            total_universities,
            total_countries,
            total_provinces,
        })
    }

    /// Per-country counts, largest first. `None` returns every country.
    pub async fn counts_by_country(&self, limit: Option<usize>) -> Result<Vec<CountryCount>> {
        let mut counts = self.country_counts().await?;
        if let Some(limit) = limit {
            counts.truncate(limit);
        }
        Ok(counts)
    }

    pub async fn country_detail(&self, country: &str) -> Result<CountryDetail> {
        let provinces = self.province_counts(country).await?;
        let total = self
            .store
            .count(&UniversityFilter::by_country(country))
            .await?;

        Ok(CountryDetail {
            country: country.to_string(),
            total,
            provinces,
        })
    }

    pub async fn province_breakdown(&self, country: &str) -> Result<ProvinceBreakdown> {
        let filter = UniversityFilter::by_country(country);
        let provinces = self.province_counts(country).await?;
        let universities = self.store.find(&filter, self.limits.list_limit).await?;
        let total_in_country = self.store.count(&filter).await?;
        let without_province = self
            .store
            .count(&filter.with_province(ProvinceFilter::Missing))
            .await?;

        Ok(ProvinceBreakdown {
            country: country.to_string(),
            provinces,
            universities,
            total_in_country,
            without_province,
        })
    }

    pub async fn country_distribution(&self) -> Result<CountryDistribution> {
        let countries = self.country_counts().await?;

        let stats = if countries.is_empty() {
            DistributionStats {
                total_countries: 0,
                avg_per_country: 0.0,
                max_count: 0,
                min_count: 0,
            }
        } else {
            let total: u64 = countries.iter().map(|c| c.count).sum();
            DistributionStats {
                total_countries: countries.len() as u64,
                avg_per_country: total as f64 / countries.len() as f64,
                max_count: countries.iter().map(|c| c.count).max().unwrap_or(0),
                min_count: countries.iter().map(|c| c.count).min().unwrap_or(0),
            }
        };

        Ok(CountryDistribution { countries, stats })
    }

    pub async fn website_presence(&self) -> Result<WebsitePresence> {
        let total = self.store.count(&UniversityFilter::all()).await?;
        let with_website = self
            .store
            .count(&UniversityFilter::all().with_website(true))
            .await?;

        Ok(WebsitePresence {
            with_website,
            without_website: total.saturating_sub(with_website),
        })
    }

    async fn country_counts(&self) -> Result<Vec<CountryCount>> {
        let groups = self
            .store
            .group_count(GroupField::Country, &UniversityFilter::all())
            .await?;

        let mut counts: Vec<CountryCount> = groups
            .into_iter()
            .filter_map(|(key, count)| key.map(|country| CountryCount { country, count }))
            .collect();
        counts.sort_by(|a, b| {
            Reverse(a.count)
                .cmp(&Reverse(b.count))
                .then_with(|| a.country.cmp(&b.country))
        });
        Ok(counts)
    }

    // 只保留有省份名稱的群組
    async fn province_counts(&self, country: &str) -> Result<Vec<ProvinceCount>> {
        let groups = self
            .store
            .group_count(GroupField::StateProvince, &UniversityFilter::by_country(country))
            .await?;

        let mut counts: Vec<ProvinceCount> = groups
            .into_iter()
            .filter_map(|(key, count)| key.map(|province| ProvinceCount { province, count }))
            .collect();
        counts.sort_by(|a, b| {
            Reverse(a.count)
                .cmp(&Reverse(b.count))
                .then_with(|| a.province.cmp(&b.province))
        });
        Ok(counts)
    }
}
