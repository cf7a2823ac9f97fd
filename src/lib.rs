//! A Rust library for exploring Swedish municipality statistics: loading
//! records from an HTTP API, JSON exports or Parquet extracts, and filtering,
//! sorting and paginating them the way the dashboard does.

pub mod compare;
pub mod config;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod format;
pub mod models;
pub mod paginate;
pub mod sort;
pub mod statistics;
pub mod store;
pub mod utils;
pub mod view;

// Re-export the most common types for easier use
// Core types
pub use config::DashboardConfig;
pub use error::{KommunError, Result};
pub use models::{
    BirthCountryEntry, IngestReport, MunicipalityRecord, NumericField, RawMunicipality,
    parse_birth_countries, parse_birth_countries_excluding,
};

// Filtering, sorting and pagination
pub use filter::{FilterCriteria, FilterSet, MunicipalityFilter, Range, filter};
pub use paginate::{Page, Paginator, paginate};
pub use sort::{SortField, SortOrder, SortSpec, sort};
pub use view::DashboardView;

// Record access
pub use compare::{MAX_COMPARE, compare_municipalities};
pub use favorites::{FavoritesRepository, JsonFileFavorites, MemoryFavorites};
pub use store::{
    Dataset, HttpRecordStore, JsonFileStore, MemoryStore, ParquetRecordStore, RecordSource,
    RecordStore,
};

// Summaries
pub use statistics::{Averages, Insight, InsightKind, insights};
