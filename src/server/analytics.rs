//! Analytics endpoints backing the dashboard charts.

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::model::{
    CountryCount, CountryDetail, CountryDistribution, OverviewStats, ProvinceBreakdown,
    WebsitePresence,
};
use crate::server::error::ApiError;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<String>,
}

/// Website presence as shown on the dashboard cards (whole percent).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteStatsResponse {
    pub with_website: u64,
    pub without_website: u64,
    pub percentage: u64,
}

impl From<WebsitePresence> for WebsiteStatsResponse {
    fn from(presence: WebsitePresence) -> Self {
        Self {
            with_website: presence.with_website,
            without_website: presence.without_website,
            percentage: presence.percentage_rounded(),
        }
    }
}

/// Website presence for the detailed report (two-decimal percent string).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedWebsiteStatsResponse {
    pub with_website: u64,
    pub without_website: u64,
    pub total: u64,
    pub percentage_with_website: String,
}

impl From<WebsitePresence> for DetailedWebsiteStatsResponse {
    fn from(presence: WebsitePresence) -> Self {
        Self {
            with_website: presence.with_website,
            without_website: presence.without_website,
            total: presence.total(),
            percentage_with_website: presence.percentage_two_decimals(),
        }
    }
}

/// Absent or empty `limit` falls back to `default`; anything else must be a
/// positive integer.
pub fn parse_limit(raw: Option<&str>, default: usize) -> Result<usize, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(value) => match value.parse::<usize>() {
            Ok(limit) if limit > 0 => Ok(limit),
            _ => Err(ApiError::bad_request("limit must be a positive integer")),
        },
    }
}

/// GET /api/analytics/stats
pub async fn overview_stats(
    State(state): State<AppState>,
) -> Result<Json<OverviewStats>, ApiError> {
    state
        .analytics
        .overview_stats()
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to fetch analytics stats"))
}

/// GET /api/analytics/universities-by-country?limit=
#[instrument(skip(state))]
pub async fn universities_by_country(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<CountryCount>>, ApiError> {
    let limit = parse_limit(params.limit.as_deref(), state.limits.by_country_default)?;
    state
        .analytics
        .counts_by_country(Some(limit))
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to fetch universities by country"))
}

/// GET /api/analytics/top-countries?limit=
#[instrument(skip(state))]
pub async fn top_countries(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<CountryCount>>, ApiError> {
    let limit = parse_limit(params.limit.as_deref(), state.limits.top_countries_default)?;
    state
        .analytics
        .counts_by_country(Some(limit))
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to fetch top countries"))
}

/// GET /api/analytics/country/{country}
#[instrument(skip(state))]
pub async fn country_detail(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<CountryDetail>, ApiError> {
    state
        .analytics
        .country_detail(&country)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to fetch country details"))
}

/// GET /api/analytics/region-distribution
pub async fn region_distribution(
    State(state): State<AppState>,
) -> Result<Json<CountryDistribution>, ApiError> {
    state
        .analytics
        .country_distribution()
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to fetch distribution"))
}

/// GET /api/analytics/website-stats
pub async fn website_stats(
    State(state): State<AppState>,
) -> Result<Json<WebsiteStatsResponse>, ApiError> {
    state
        .analytics
        .website_presence()
        .await
        .map(|presence| Json(presence.into()))
        .map_err(|e| ApiError::from_service(e, "Failed to fetch website stats"))
}

/// GET /api/analytics/website-stats/detailed
pub async fn website_stats_detailed(
    State(state): State<AppState>,
) -> Result<Json<DetailedWebsiteStatsResponse>, ApiError> {
    state
        .analytics
        .website_presence()
        .await
        .map(|presence| Json(presence.into()))
        .map_err(|e| ApiError::from_service(e, "Failed to fetch website stats"))
}

/// GET /api/analytics/provinces/{country}
#[instrument(skip(state))]
pub async fn province_breakdown(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<ProvinceBreakdown>, ApiError> {
    state
        .analytics
        .province_breakdown(&country)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to fetch country data"))
}
