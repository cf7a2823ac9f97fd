use crate::utils::{SAMPLE_JSON, sample_records};
use kommundata::{
    DashboardConfig, Dataset, JsonFileStore, KommunError, RecordSource, RecordStore,
};

/// A JSON export loads into validated records
#[tokio::test]
async fn test_json_export_round_trip() -> kommundata::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("kommuner.json");
    std::fs::write(&path, SAMPLE_JSON)?;

    let store = JsonFileStore::new(path.clone());
    let records = store.list().await?;
    assert_eq!(records, sample_records());

    let malmo = store.get("1280").await?.expect("Malmö is in the export");
    assert_eq!(malmo.county.as_deref(), Some("Skåne län"));
    assert!(store.get("0000").await?.is_none());
    Ok(())
}

/// The source string picks the JSON store and config decides strictness
#[tokio::test]
async fn test_open_from_source_string() -> kommundata::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("kommuner.json");
    std::fs::write(
        &path,
        r#"[{"id": "1", "name": "A", "population": 5}, {"id": "1", "name": "B", "population": 6}]"#,
    )?;
    let source = RecordSource::parse(path.to_str().expect("utf-8 temp path"))?;

    let lenient = source.open(&DashboardConfig::default())?;
    let records = lenient.list().await?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "A");

    let strict_config = DashboardConfig {
        strict_validation: true,
        ..DashboardConfig::default()
    };
    let strict = source.open(&strict_config)?;
    assert!(matches!(
        strict.list().await,
        Err(KommunError::Validation { id, .. }) if id == "1"
    ));
    Ok(())
}

/// A missing export gives an empty dataset with the error recorded
#[tokio::test]
async fn test_missing_export_gives_error_dataset() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = JsonFileStore::new(dir.path().join("missing.json"));

    let dataset = Dataset::load(&store).await;
    assert!(dataset.records.is_empty());
    assert!(dataset.error.is_some());
}
