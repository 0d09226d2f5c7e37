use httpmock::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use uni_directory::adapters::dataset;
use uni_directory::core::{UniversityFilter, UniversityStore};
use uni_directory::{DatasetPipeline, FileStore, LocalStorage, SeedEngine, SeedOutcome};

fn dataset_json() -> serde_json::Value {
    serde_json::json!([
        {
            "web_pages": ["http://www.mit.edu/"],
            "name": "Massachusetts Institute of Technology",
            "alpha_two_code": "US",
            "state-province": null,
            "domains": ["mit.edu"],
            "country": "United States"
        },
        {
            "web_pages": ["https://www.ucla.edu/"],
            "name": "University of California, Los Angeles",
            "alpha_two_code": "US",
            "state-province": "California",
            "domains": ["ucla.edu"],
            "country": "United States"
        },
        {
            "web_pages": [],
            "name": "Broken Entry",
            "country": ""
        }
    ])
}

async fn open_store(dir: &TempDir) -> Arc<dyn UniversityStore> {
    let store = FileStore::open(LocalStorage::new(dir.path()), "store.json")
        .await
        .unwrap();
    Arc::new(store)
}

#[tokio::test]
async fn test_seed_from_http_dataset_then_skip_on_restart() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/world_universities_and_domains.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(dataset_json());
        })
        .await;

    let url = server.url("/world_universities_and_domains.json");
    let data_dir = temp_dir.path().to_str().unwrap().to_string();

    // 第一次啟動：空 store，從 HTTP 匯入
    let store = open_store(&temp_dir).await;
    let source = dataset::from_source(&url, &data_dir, Duration::from_secs(5));
    let engine = SeedEngine::new(DatasetPipeline::new(source, store.clone()), store.clone());

    let outcome = engine.ensure_seeded().await.unwrap();
    assert_eq!(
        outcome,
        SeedOutcome::Imported {
            inserted: 2,
            rejected: 1
        }
    );
    api_mock.assert_hits_async(1).await;
    assert!(temp_dir.path().join("store.json").exists());

    // 重新啟動：snapshot 已有資料，不再下載
    let store = open_store(&temp_dir).await;
    let source = dataset::from_source(&url, &data_dir, Duration::from_secs(5));
    let engine = SeedEngine::new(DatasetPipeline::new(source, store.clone()), store.clone());

    let outcome = engine.ensure_seeded().await.unwrap();
    assert_eq!(outcome, SeedOutcome::AlreadySeeded { existing: 2 });
    api_mock.assert_hits_async(1).await;

    let ucla = store
        .find_one(&UniversityFilter::by_name("University of California, Los Angeles"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ucla.province(), Some("California"));
}

#[tokio::test]
async fn test_seed_from_local_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("data.json"),
        serde_json::to_vec(&dataset_json()).unwrap(),
    )
    .unwrap();

    let store = open_store(&temp_dir).await;
    let source = dataset::from_source(
        "data.json",
        temp_dir.path().to_str().unwrap(),
        Duration::from_secs(5),
    );
    let engine = SeedEngine::new(DatasetPipeline::new(source, store.clone()), store.clone());

    engine.ensure_seeded().await.unwrap();
    assert_eq!(store.count(&UniversityFilter::all()).await.unwrap(), 2);
}

#[tokio::test]
async fn test_missing_dataset_leaves_store_empty_and_is_not_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir).await;
    let source = dataset::from_source(
        "missing.json",
        temp_dir.path().to_str().unwrap(),
        Duration::from_secs(5),
    );
    let engine = SeedEngine::new(DatasetPipeline::new(source, store.clone()), store.clone());

    let err = engine.ensure_seeded().await.unwrap_err();
    assert!(!err.is_fatal_at_startup());
    assert_eq!(store.count(&UniversityFilter::all()).await.unwrap(), 0);
    assert!(!temp_dir.path().join("store.json").exists());
}
