//! Directory endpoints: countries, provinces, listing, lookup and search.

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use tracing::instrument;

use crate::domain::model::University;
use crate::server::error::ApiError;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct UniversityListParams {
    pub country: Option<String>,
    pub province: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// GET /api/countries
pub async fn list_countries(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    state
        .query
        .list_countries()
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to fetch countries"))
}

/// GET /api/provinces/{country}
#[instrument(skip(state))]
pub async fn list_provinces(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    state
        .query
        .list_provinces(&country)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to fetch provinces"))
}

/// GET /api/universities?country=&province=
#[instrument(skip(state))]
pub async fn list_universities(
    State(state): State<AppState>,
    Query(params): Query<UniversityListParams>,
) -> Result<Json<Vec<University>>, ApiError> {
    state
        .query
        .list_universities(params.country.as_deref(), params.province.as_deref())
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to fetch universities"))
}

/// GET /api/university/{name}
#[instrument(skip(state))]
pub async fn get_university(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<University>, ApiError> {
    state
        .query
        .get_university_by_name(&name)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to fetch university"))
}

/// GET /api/search?q=
#[instrument(skip(state))]
pub async fn search_universities(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<University>>, ApiError> {
    state
        .query
        .search_universities(params.q.as_deref())
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to search universities"))
}
