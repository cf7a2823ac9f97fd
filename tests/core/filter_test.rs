use crate::utils::{mixed_records, random_records};
use kommundata::filter::parse_range_predicate;
use kommundata::{
    FilterCriteria, FilterSet, KommunError, MunicipalityFilter, NumericField, Range, filter,
};

fn ids(records: &[kommundata::MunicipalityRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

/// Unscored records count as 0 for range membership
#[test]
fn test_null_safety_score_is_coalesced() -> kommundata::Result<()> {
    let records = mixed_records();

    let strict = FilterSet::new().with_range(NumericField::SafetyScore, Range::new(50.0, 100.0)?);
    assert_eq!(ids(&filter(&records, &strict)), vec!["1", "4", "5"]);

    let full = FilterSet::new().with_range(NumericField::SafetyScore, Range::new(0.0, 100.0)?);
    assert_eq!(filter(&records, &full).len(), records.len());

    Ok(())
}

/// Search is a case-insensitive substring match on the name
#[test]
fn test_name_search() {
    let records = mixed_records();

    let lilla = FilterSet::new().with_query("LILLA");
    assert_eq!(ids(&filter(&records, &lilla)), vec!["5"]);

    let ma = FilterSet::new().with_query("ma");
    assert_eq!(ids(&filter(&records, &ma)), vec!["2", "3"]);
}

/// Query and ranges are combined with AND and input order is kept
#[test]
fn test_predicates_combine() -> kommundata::Result<()> {
    let records = mixed_records();
    let set = FilterSet::dashboard_defaults()
        .with_query("l")
        .with_range(NumericField::SafetyScore, "55..".parse()?)
        .with_range(NumericField::Population, Range::new(20_000.0, 200_000.0)?);

    assert_eq!(ids(&filter(&records, &set)), vec!["1", "4"]);
    assert_eq!(set.active_filter_count(), 3);
    Ok(())
}

/// An empty predicate set returns a copy of the input
#[test]
fn test_empty_predicates() {
    let records = mixed_records();
    assert_eq!(filter(&records, &FilterSet::new()), records);
    assert!(filter(&[], &FilterSet::dashboard_defaults()).is_empty());
}

/// Filtering twice with the same predicates changes nothing
#[test]
fn test_filter_is_idempotent() -> kommundata::Result<()> {
    for seed in 0..20 {
        let records = random_records(seed, 200);
        let set = FilterSet::new()
            .with_query("1")
            .with_range(NumericField::SafetyScore, Range::new(20.0, 80.0)?)
            .with_range(NumericField::PricePerSqm, Range::new(0.0, 60_000.0)?);

        let once = filter(&records, &set);
        let twice = filter(&once, &set);
        assert_eq!(once, twice, "seed {seed}");
    }
    Ok(())
}

/// The criteria enum composes with All and Any
#[test]
fn test_criteria_composition() -> kommundata::Result<()> {
    let records = mixed_records();
    let cheap_or_safe = MunicipalityFilter::Any(vec![
        MunicipalityFilter::in_range(NumericField::SchoolRating, Range::new(50.0, 100.0)?),
        MunicipalityFilter::in_range(NumericField::PricePerSqm, Range::new(40_000.0, 50_000.0)?),
    ]);
    let matched: Vec<_> = records
        .iter()
        .filter(|r| cheap_or_safe.meets_criteria(r))
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(matched, vec!["1", "4"]);
    Ok(())
}

/// Range predicates from the command line
#[test]
fn test_parse_range_predicate() -> kommundata::Result<()> {
    let (field, range) = parse_range_predicate("price_per_sqm=10000..40000")?;
    assert_eq!(field, NumericField::PricePerSqm);
    assert_eq!((range.lo(), range.hi()), (10_000.0, 40_000.0));

    assert!(matches!(
        parse_range_predicate("rainfall=0..10"),
        Err(KommunError::InvalidField(_))
    ));
    assert!(matches!(
        parse_range_predicate("population=10..5"),
        Err(KommunError::InvalidRange(_))
    ));
    assert!(parse_range_predicate("population").is_err());
    Ok(())
}

/// Reset restores every slider to its full extent
#[test]
fn test_reset_restores_defaults() -> kommundata::Result<()> {
    let mut set = FilterSet::dashboard_defaults()
        .with_query("malmö")
        .with_range(NumericField::EmploymentRate, Range::new(60.0, 100.0)?);
    assert_eq!(set.active_filter_count(), 2);

    set.reset();
    assert_eq!(set, FilterSet::dashboard_defaults());
    assert_eq!(set.active_filter_count(), 0);
    Ok(())
}
