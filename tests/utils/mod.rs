use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use kommundata::MunicipalityRecord;

/// Rows shared by the store tests, in wire format
pub const SAMPLE_JSON: &str = r#"[
    {"id": "0180", "name": "Stockholm", "county": "Stockholms län", "population": 984748,
     "safety_score": 61.5, "school_rating": 74.0, "price_per_sqm": 98000,
     "employment_rate": 78.2, "utrikes_fodda": 259000, "procent_utlandsk_bakgrund": 34.1,
     "top_fodelselander": "Sverige: 725748 | Finland: 14000 | Irak: 17000"},
    {"id": "1280", "name": "Malmö", "county": "Skåne län", "population": 357377,
     "safety_score": 48.0, "school_rating": 63.5, "price_per_sqm": 32000,
     "employment_rate": 66.0, "utrikes_fodda": 120000, "procent_utlandsk_bakgrund": 49.0,
     "top_fodelselander": "Sverige: 237377 | Irak: 12000 | Syrien: 15000"},
    {"id": "2582", "name": "Boden", "population": 28000, "safety_score": null}
]"#;

/// The records [`SAMPLE_JSON`] should ingest to
#[must_use]
pub fn sample_records() -> Vec<MunicipalityRecord> {
    serde_json::from_str(SAMPLE_JSON).expect("sample rows are valid")
}

/// A small hand-made list covering nulls and ties
#[must_use]
pub fn mixed_records() -> Vec<MunicipalityRecord> {
    vec![
        MunicipalityRecord::new("1", "Lund", 127_000)
            .with_safety_score(70.0)
            .with_price_per_sqm(45_000.0)
            .with_employment_rate(72.5),
        MunicipalityRecord::new("2", "Malmö", 357_000).with_safety_score(48.0),
        MunicipalityRecord::new("3", "Lomma", 25_000),
        MunicipalityRecord::new("4", "Eslöv", 34_000)
            .with_safety_score(70.0)
            .with_school_rating(60.0),
        MunicipalityRecord::new("5", "lilla Edet", 14_000).with_safety_score(55.0),
    ]
}

/// Random records with optional fields left out at random
#[must_use]
pub fn random_records(seed: u64, count: usize) -> Vec<MunicipalityRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let mut record = MunicipalityRecord::new(
                i.to_string(),
                format!("Kommun {}", rng.random_range(0..50_u32)),
                rng.random_range(0..1_200_000_u64),
            );
            if rng.random_bool(0.7) {
                record = record.with_safety_score(f64::from(rng.random_range(0..=1000_u32)) / 10.0);
            }
            if rng.random_bool(0.7) {
                record = record.with_school_rating(f64::from(rng.random_range(0..=1000_u32)) / 10.0);
            }
            if rng.random_bool(0.7) {
                record = record.with_price_per_sqm(f64::from(rng.random_range(5_000..120_000_u32)));
            }
            record
        })
        .collect()
}

/// Write [`SAMPLE_JSON`] equivalent rows to a Parquet file
///
/// `id` and `population` are written as integers to exercise the flexible
/// column decoding.
pub fn write_sample_parquet(path: &Path) -> kommundata::Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("name", DataType::Utf8, true),
        Field::new("county", DataType::Utf8, true),
        Field::new("population", DataType::Int64, true),
        Field::new("safety_score", DataType::Float64, true),
        Field::new("school_rating", DataType::Float64, true),
        Field::new("price_per_sqm", DataType::Int64, true),
        Field::new("employment_rate", DataType::Float64, true),
        Field::new("utrikes_fodda", DataType::Int64, true),
        Field::new("procent_utlandsk_bakgrund", DataType::Float64, true),
        Field::new("top_fodelselander", DataType::Utf8, true),
        Field::new("created_at", DataType::Utf8, true),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec!["0180", "1280", "2582"])),
        Arc::new(StringArray::from(vec![Some("Stockholm"), Some("Malmö"), Some("Boden")])),
        Arc::new(StringArray::from(vec![Some("Stockholms län"), Some("Skåne län"), None])),
        Arc::new(Int64Array::from(vec![Some(984_748), Some(357_377), Some(28_000)])),
        Arc::new(Float64Array::from(vec![Some(61.5), Some(48.0), None])),
        Arc::new(Float64Array::from(vec![Some(74.0), Some(63.5), None])),
        Arc::new(Int64Array::from(vec![Some(98_000), Some(32_000), None])),
        Arc::new(Float64Array::from(vec![Some(78.2), Some(66.0), None])),
        Arc::new(Int64Array::from(vec![Some(259_000), Some(120_000), None])),
        Arc::new(Float64Array::from(vec![Some(34.1), Some(49.0), None])),
        Arc::new(StringArray::from(vec![
            Some("Sverige: 725748 | Finland: 14000 | Irak: 17000"),
            Some("Sverige: 237377 | Irak: 12000 | Syrien: 15000"),
            None,
        ])),
        Arc::new(StringArray::from(vec![Some("2025-10-30"), None, None])),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns)?;
    write_batches(path, schema, &[batch])
}

/// Write batches to a Parquet file
pub fn write_batches(
    path: &Path,
    schema: Arc<Schema>,
    batches: &[RecordBatch],
) -> kommundata::Result<()> {
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    for batch in batches {
        writer.write(batch)?;
    }
    writer.close()?;
    Ok(())
}
