use std::time::Duration;

use crate::utils::{SAMPLE_JSON, sample_records};
use kommundata::{DashboardConfig, Dataset, HttpRecordStore, KommunError, RecordStore};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config() -> DashboardConfig {
    DashboardConfig {
        request_timeout: Duration::from_secs(5),
        ..DashboardConfig::default()
    }
}

/// Store for the mock server, bypassing any proxy set in the environment
fn local_store(base: impl Into<String>) -> kommundata::Result<HttpRecordStore> {
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()?;
    Ok(HttpRecordStore::new(base, &config())?.with_client(client))
}

/// The list route yields the same records as the JSON export
#[tokio::test]
async fn test_list_over_http() -> kommundata::Result<()> {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/municipalities"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_JSON))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = local_store(format!("{}/api", mock_server.uri()))?;
    assert_eq!(store.list().await?, sample_records());
    Ok(())
}

/// Single records are fetched by id, with a flexible row shape
#[tokio::test]
async fn test_get_over_http() -> kommundata::Result<()> {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/municipalities/1280"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1280,
            "name": "Malmö",
            "population": "357377",
            "safety_score": 48
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = local_store(format!("{}/api/", mock_server.uri()))?;
    let malmo = store.get("1280").await?.expect("route serves Malmö");
    assert_eq!(malmo.id, "1280");
    assert_eq!(malmo.population, 357_377);
    assert_eq!(malmo.safety_score, Some(48.0));
    Ok(())
}

/// 404 on the single-record route means the id does not exist
#[tokio::test]
async fn test_get_missing_over_http() -> kommundata::Result<()> {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/municipalities/9999"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = local_store(format!("{}/api", mock_server.uri()))?;
    assert!(store.get("9999").await?.is_none());
    Ok(())
}

/// Other failing statuses are errors carrying the status and URL
#[tokio::test]
async fn test_server_error() -> kommundata::Result<()> {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/municipalities/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let store = local_store(format!("{}/api", mock_server.uri()))?;
    let err = store.get("broken").await.unwrap_err();
    assert!(matches!(
        err,
        KommunError::HttpStatus { status: 500, ref url } if url.ends_with("/api/municipalities/broken")
    ));
    Ok(())
}

/// A failed list becomes an empty dataset instead of an error
#[tokio::test]
async fn test_failed_fetch_gives_error_dataset() -> kommundata::Result<()> {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/municipalities"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let store = local_store(mock_server.uri())?;
    let dataset = Dataset::load(&store).await;
    assert!(dataset.records.is_empty());
    let error = dataset.error.expect("load failed");
    assert!(error.contains("503"));
    Ok(())
}
