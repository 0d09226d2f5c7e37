use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uni_directory::core::{GroupField, UniversityFilter, UniversityStore};
use uni_directory::domain::model::QueryLimits;
use uni_directory::{create_router, AppConfig, AppState, DirectoryError, MemoryStore, University};

fn fixture() -> Vec<University> {
    vec![
        University::new("Harvard University", "United States")
            .with_province("Massachusetts")
            .with_web_page("http://www.harvard.edu/"),
        University::new("Boston University", "United States")
            .with_province("Massachusetts")
            .with_web_page("http://www.bu.edu/"),
        University::new("Stanford University", "United States")
            .with_province("California")
            .with_web_page("http://www.stanford.edu/"),
        University::new("University of Oxford", "United Kingdom")
            .with_web_page("http://www.ox.ac.uk/"),
        University::new("Université de Montréal", "Canada").with_province("Québec"),
    ]
}

fn app_with(store: Arc<dyn UniversityStore>) -> axum::Router {
    let config = AppConfig::default();
    create_router(AppState::new(store, QueryLimits::default()), &config)
}

fn app() -> axum::Router {
    app_with(Arc::new(MemoryStore::with_records(fixture())))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

struct UnavailableStore;

#[async_trait]
impl UniversityStore for UnavailableStore {
    async fn ping(&self) -> uni_directory::Result<()> {
        Err(DirectoryError::store("connection refused"))
    }

    async fn count(&self, _filter: &UniversityFilter) -> uni_directory::Result<u64> {
        Err(DirectoryError::store("connection refused"))
    }

    async fn distinct(
        &self,
        _field: GroupField,
        _filter: &UniversityFilter,
    ) -> uni_directory::Result<Vec<String>> {
        Err(DirectoryError::store("connection refused"))
    }

    async fn find(
        &self,
        _filter: &UniversityFilter,
        _limit: usize,
    ) -> uni_directory::Result<Vec<University>> {
        Err(DirectoryError::store("connection refused"))
    }

    async fn find_one(
        &self,
        _filter: &UniversityFilter,
    ) -> uni_directory::Result<Option<University>> {
        Err(DirectoryError::store("connection refused"))
    }

    async fn group_count(
        &self,
        _field: GroupField,
        _filter: &UniversityFilter,
    ) -> uni_directory::Result<Vec<(Option<String>, u64)>> {
        Err(DirectoryError::store("connection refused"))
    }

    async fn insert_many(&self, _records: Vec<University>) -> uni_directory::Result<u64> {
        Err(DirectoryError::store("connection refused"))
    }
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Server is running");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_countries_sorted() {
    let (status, body) = get(app(), "/api/countries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!(["Canada", "United Kingdom", "United States"])
    );
}

#[tokio::test]
async fn test_provinces_percent_decoded() {
    let (status, body) = get(app(), "/api/provinces/United%20States").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!(["California", "Massachusetts"]));

    let (status, body) = get(app(), "/api/provinces/United%20Kingdom").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_universities_filtered() {
    let (status, body) = get(
        app(),
        "/api/universities?country=United%20States&province=Massachusetts",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|u| u["country"] == "United States"));
    assert!(list.iter().all(|u| u["state-province"] == "Massachusetts"));
}

#[tokio::test]
async fn test_universities_unfiltered_capped() {
    let records = (0..120)
        .map(|i| University::new(format!("College {}", i), "X"))
        .collect();
    let app = app_with(Arc::new(MemoryStore::with_records(records)));

    let (status, body) = get(app, "/api/universities").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 100);
}

#[tokio::test]
async fn test_university_by_name() {
    let (status, body) = get(app(), "/api/university/Universit%C3%A9%20de%20Montr%C3%A9al").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["country"], "Canada");
    assert_eq!(body["state-province"], "Québec");

    let (status, body) = get(app(), "/api/university/Nowhere%20College").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "University not found");
}

#[tokio::test]
async fn test_search() {
    let (status, body) = get(app(), "/api/search?q=UNIVERSITY").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);

    let (status, body) = get(app(), "/api/search?q=oxford").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "University of Oxford");
}

#[tokio::test]
async fn test_search_without_query_is_bad_request() {
    for uri in ["/api/search", "/api/search?q="] {
        let (status, body) = get(app(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Search query required");
    }

    let empty = app_with(Arc::new(MemoryStore::new()));
    let (status, _) = get(empty, "/api/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analytics_stats() {
    let (status, body) = get(app(), "/api/analytics/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalUniversities"], 5);
    assert_eq!(body["totalCountries"], 3);
    assert_eq!(body["totalProvinces"], 3);
}

#[tokio::test]
async fn test_universities_by_country_and_top_countries() {
    let (status, body) = get(app(), "/api/analytics/universities-by-country").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0], serde_json::json!({"country": "United States", "count": 3}));
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, body) = get(app(), "/api/analytics/top-countries?limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = get(app(), "/api/analytics/top-countries?limit=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_country_detail() {
    let (status, body) = get(app(), "/api/analytics/country/United%20States").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["country"], "United States");
    assert_eq!(body["total"], 3);
    assert_eq!(
        body["provinces"],
        serde_json::json!([
            {"province": "Massachusetts", "count": 2},
            {"province": "California", "count": 1}
        ])
    );
}

#[tokio::test]
async fn test_region_distribution() {
    let (status, body) = get(app(), "/api/analytics/region-distribution").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["totalCountries"], 3);
    assert_eq!(body["stats"]["maxCount"], 3);
    assert_eq!(body["stats"]["minCount"], 1);
    assert_eq!(body["countries"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_website_stats_both_renderings() {
    let (status, body) = get(app(), "/api/analytics/website-stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["withWebsite"], 4);
    assert_eq!(body["withoutWebsite"], 1);
    assert_eq!(body["percentage"], 80);

    let (status, body) = get(app(), "/api/analytics/website-stats/detailed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert_eq!(body["percentageWithWebsite"], "80.00");
}

#[tokio::test]
async fn test_province_breakdown() {
    let (status, body) = get(app(), "/api/analytics/provinces/United%20Kingdom").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalInCountry"], 1);
    assert_eq!(body["withoutProvince"], 1);
    assert_eq!(body["provinces"], serde_json::json!([]));
    assert_eq!(body["universities"][0]["name"], "University of Oxford");
}

fn many_countries() -> Vec<University> {
    let mut records: Vec<University> = (0..120)
        .map(|i| University::new(format!("Big University {:03}", i), "Country 00"))
        .collect();
    records.extend((1..40).map(|c| {
        University::new(format!("Small University {:02}", c), format!("Country {:02}", c))
    }));
    records
}

#[tokio::test]
async fn test_default_limits_per_route() {
    let store: Arc<dyn UniversityStore> = Arc::new(MemoryStore::with_records(many_countries()));

    let (status, body) = get(
        app_with(store.clone()),
        "/api/analytics/universities-by-country",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 30);
    assert_eq!(body[0], serde_json::json!({"country": "Country 00", "count": 120}));

    let (status, body) = get(app_with(store.clone()), "/api/analytics/top-countries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 15);

    let (status, body) = get(app_with(store), "/api/analytics/provinces/Country%2000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["universities"].as_array().unwrap().len(), 100);
    assert_eq!(body["totalInCountry"], 120);
    assert_eq!(body["withoutProvince"], 120);
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, body) = get(app(), "/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
}

#[tokio::test]
async fn test_store_failure_returns_generic_500() {
    let cases = [
        ("/api/countries", "Failed to fetch countries"),
        ("/api/search?q=x", "Failed to search universities"),
        ("/api/university/x", "Failed to fetch university"),
        ("/api/analytics/stats", "Failed to fetch analytics stats"),
        ("/api/analytics/website-stats", "Failed to fetch website stats"),
    ];

    for (uri, message) in cases {
        let (status, body) = get(app_with(Arc::new(UnavailableStore)), uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(body["error"], message);
        assert!(!body.to_string().contains("connection refused"));
    }
}
