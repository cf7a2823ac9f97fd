//! Municipality data models
//!
//! Records, the numeric field set used for filtering and sorting, the
//! birth-country parser and the ingestion validator.

pub mod birth_country;
pub mod field;
pub mod ingest;
pub mod municipality;

pub use birth_country::{
    BirthCountryEntry, parse_birth_countries, parse_birth_countries_excluding,
    share_of_foreign_born,
};
pub use field::NumericField;
pub use ingest::{IngestReport, ingest_records};
pub use municipality::{MunicipalityRecord, RawMunicipality};
