use std::str::FromStr;

use crate::utils::{mixed_records, random_records};
use kommundata::{KommunError, MunicipalityRecord, NumericField, SortField, SortOrder, SortSpec, sort};

fn ids(records: &[MunicipalityRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

/// Absent scores sort as 0 and ties keep input order in both directions
#[test]
fn test_safety_sort_is_stable_with_nulls() {
    let records = mixed_records();

    let asc = sort(&records, NumericField::SafetyScore.into(), SortOrder::Asc);
    assert_eq!(ids(&asc), vec!["3", "2", "5", "1", "4"]);

    let desc = sort(&records, NumericField::SafetyScore.into(), SortOrder::Desc);
    assert_eq!(ids(&desc), vec!["1", "4", "5", "2", "3"]);
}

/// A row carrying `-0.0` ties with an absent value and keeps input order
#[test]
fn test_negative_zero_keeps_input_order() -> kommundata::Result<()> {
    let records: Vec<MunicipalityRecord> = serde_json::from_str(
        r#"[{"id": "a", "population": 1}, {"id": "b", "population": 1, "safety_score": -0.0}]"#,
    )?;

    let asc = sort(&records, NumericField::SafetyScore.into(), SortOrder::Asc);
    assert_eq!(ids(&asc), vec!["a", "b"]);
    let desc = sort(&records, NumericField::SafetyScore.into(), SortOrder::Desc);
    assert_eq!(ids(&desc), vec!["a", "b"]);
    Ok(())
}

/// Names compare as given, so lowercase sorts after uppercase
#[test]
fn test_name_sort_is_case_sensitive() {
    let records = mixed_records();
    let sorted = sort(&records, SortField::Name, SortOrder::Asc);
    let names: Vec<_> = sorted.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Eslöv", "Lomma", "Lund", "Malmö", "lilla Edet"]);
}

/// Sorting a sorted list again changes nothing
#[test]
fn test_sort_is_idempotent() {
    for seed in 0..20 {
        let records = random_records(seed, 150);
        for field in [SortField::Name, NumericField::SchoolRating.into()] {
            let once = sort(&records, field, SortOrder::Asc);
            let twice = sort(&once, field, SortOrder::Asc);
            assert_eq!(once, twice, "seed {seed}, field {field}");
        }
    }
}

/// Without ties, descending is the reverse of ascending
#[test]
fn test_desc_reverses_asc_without_ties() {
    for seed in 0..20 {
        // record ids are unique, so make population unique too
        let records: Vec<_> = random_records(seed, 100)
            .into_iter()
            .enumerate()
            .map(|(i, mut r)| {
                r.population = r.population * 1000 + i as u64;
                r
            })
            .collect();

        let asc = sort(&records, NumericField::Population.into(), SortOrder::Asc);
        let mut desc = sort(&records, NumericField::Population.into(), SortOrder::Desc);
        desc.reverse();
        assert_eq!(asc, desc, "seed {seed}");
    }
}

/// The dashboard's select values parse into sort specs
#[test]
fn test_sort_spec_parsing() -> kommundata::Result<()> {
    assert_eq!(SortSpec::default(), SortSpec::from_str("population-desc")?);
    assert_eq!(
        SortSpec::from_str("price_per_sqm-asc")?,
        SortSpec {
            field: NumericField::PricePerSqm.into(),
            order: SortOrder::Asc,
        }
    );
    assert_eq!(SortSpec::from_str("name-asc")?.field, SortField::Name);

    assert!(matches!(
        SortSpec::from_str("bogus-asc"),
        Err(KommunError::InvalidField(_))
    ));
    assert!(matches!(
        SortSpec::from_str("name-sideways"),
        Err(KommunError::InvalidSortOrder(_))
    ));
    Ok(())
}
