//! Filter engine for municipality records
//!
//! Criteria are composable (`MunicipalityFilter`) and the dashboard's
//! predicate set (`FilterSet`) lowers onto them. Absent numeric values are
//! treated as `0` for range membership, so an unscored municipality passes a
//! range starting at `0` and fails any range with a positive minimum.

pub mod criteria;
pub mod range;
pub mod set;

pub use criteria::{FilterCriteria, MunicipalityFilter, filter_records};
pub use range::Range;
pub use set::{FilterSet, default_range, filter, parse_range_predicate};
