//! HTTP surface: router, shared state and the serve loop.

pub mod analytics;
pub mod cors;
pub mod error;
pub mod query;

use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::core::analytics::AnalyticsService;
use crate::core::query::QueryService;
use crate::domain::model::QueryLimits;
use crate::domain::ports::UniversityStore;
use crate::server::error::ApiError;

/// Handler state. Both services share the one injected store handle.
#[derive(Clone)]
pub struct AppState {
    pub query: Arc<QueryService>,
    pub analytics: Arc<AnalyticsService>,
    pub limits: QueryLimits,
}

impl AppState {
    pub fn new(store: Arc<dyn UniversityStore>, limits: QueryLimits) -> Self {
        Self {
            query: Arc::new(QueryService::new(store.clone(), limits)),
            analytics: Arc::new(AnalyticsService::new(store, limits)),
            limits,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Server is running",
        timestamp: chrono::Utc::now(),
    })
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/countries", get(query::list_countries))
        .route("/provinces/{country}", get(query::list_provinces))
        .route("/universities", get(query::list_universities))
        .route("/university/{name}", get(query::get_university))
        .route("/search", get(query::search_universities))
        .route("/analytics/stats", get(analytics::overview_stats))
        .route(
            "/analytics/universities-by-country",
            get(analytics::universities_by_country),
        )
        .route("/analytics/top-countries", get(analytics::top_countries))
        .route("/analytics/country/{country}", get(analytics::country_detail))
        .route(
            "/analytics/region-distribution",
            get(analytics::region_distribution),
        )
        .route("/analytics/website-stats", get(analytics::website_stats))
        .route(
            "/analytics/website-stats/detailed",
            get(analytics::website_stats_detailed),
        )
        .route(
            "/analytics/provinces/{country}",
            get(analytics::province_breakdown),
        )
}

pub fn create_router(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .route("/health", get(health))
        .fallback(route_not_found)
        .layer(cors::create_cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the listener and serves until Ctrl-C / SIGTERM.
pub async fn serve(state: AppState, config: &AppConfig) -> anyhow::Result<()> {
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!("🎓 University directory API");
    tracing::info!("📍 Listening on http://{}", address);
    tracing::info!("🔗 API base: http://{}/api", address);

    axum::serve(listener, create_router(state, config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server closed");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl-C received, shutting down"),
        _ = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}
