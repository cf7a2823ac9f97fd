use crate::utils::SAMPLE_JSON;
use kommundata::utils::logging::console::{render_details, render_insights, render_page};
use kommundata::{
    Averages, DashboardConfig, DashboardView, Dataset, FavoritesRepository, JsonFileFavorites,
    NumericField, Paginator, Range, RecordSource, SortField, SortOrder, SortSpec, insights,
};

/// Load, filter, sort and page a JSON export the way the CLI list command does
#[tokio::test]
async fn test_list_pipeline_from_export() -> kommundata::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("kommuner.json");
    std::fs::write(&path, SAMPLE_JSON)?;

    let config = DashboardConfig::default();
    let store = RecordSource::parse(path.to_str().expect("utf-8 temp path"))?.open(&config)?;
    let dataset = Dataset::load(store.as_ref()).await;
    assert!(dataset.is_ok());
    assert_eq!(dataset.len(), 3);

    let mut view = DashboardView::new(dataset.records, Paginator::new(config.page_size)?);
    view.set_range(NumericField::SafetyScore, Range::new(40.0, 100.0)?);
    view.set_sort(SortSpec::new(SortField::Name, SortOrder::Asc));

    let page = view.page();
    let names: Vec<_> = page.items.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Malmö", "Stockholm"]);

    let text = render_page(&page, &["0180".to_string()]);
    assert!(text.lines().any(|l| l.starts_with('*') && l.contains("Stockholm")));
    Ok(())
}

/// Detail view and insights over the sample rows
#[test]
fn test_details_and_insights() {
    let records = crate::utils::sample_records();

    let details = render_details(&records[0], "Sverige");
    assert!(details.contains("Stockholm (0180)"));
    assert!(details.contains("Län: Stockholms län"));
    let irak = details.find("Irak").expect("Irak listed");
    let finland = details.find("Finland").expect("Finland listed");
    assert!(irak < finland);

    let text = render_insights(&insights(&records), &Averages::of(&records));
    assert!(text.contains("Stockholm har högst säkerhetsvärde (61,5/100)"));
    assert!(text.contains("Malmö har störst andel utländsk bakgrund (49,0\u{a0}%)"));
    assert!(text.contains("Genomsnitt:"));
}

/// Insights and averages only see the filtered records
#[test]
fn test_insights_over_filtered_records() -> kommundata::Result<()> {
    let mut view = DashboardView::new(crate::utils::sample_records(), Paginator::default());
    view.set_range(NumericField::Population, Range::new(0.0, 500_000.0)?);

    let records = view.filtered();
    let text = render_insights(&insights(records), &Averages::of(records));
    assert!(text.contains("Malmö har högst säkerhetsvärde (48,0/100)"));
    assert!(!text.contains("Stockholm"));

    let names: Vec<_> = view.leading(10).iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Malmö", "Boden"]);
    Ok(())
}

/// Favorites survive reopening the file and only mark, never filter
#[test]
fn test_favorites_are_independent_of_filtering() -> kommundata::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("favorites.json");

    let mut favorites = JsonFileFavorites::open(&path)?;
    assert!(favorites.toggle("1280")?);
    assert!(favorites.toggle("2582")?);
    assert!(!favorites.toggle("2582")?);

    let reopened = JsonFileFavorites::open(&path)?;
    assert_eq!(reopened.list(), vec!["1280"]);

    let view = DashboardView::new(crate::utils::sample_records(), Paginator::default());
    assert_eq!(view.filtered().len(), 3);
    Ok(())
}
