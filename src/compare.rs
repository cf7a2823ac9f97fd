//! Side-by-side comparison of a few municipalities

use futures::future::try_join_all;
use itertools::Itertools;

use crate::error::{KommunError, Result};
use crate::models::{MunicipalityRecord, NumericField};
use crate::store::RecordStore;

/// Most municipalities a comparison can hold
pub const MAX_COMPARE: usize = 3;

/// Fetch the records for `ids`, in the order given
///
/// Repeated ids are fetched once. All lookups run concurrently and the first
/// failure aborts the comparison.
///
/// # Errors
/// * [`KommunError::TooManyToCompare`] for more than [`MAX_COMPARE`] distinct ids
/// * [`KommunError::NotFound`] when an id has no record
pub async fn compare_municipalities(
    store: &dyn RecordStore,
    ids: &[String],
) -> Result<Vec<MunicipalityRecord>> {
    let ids = ids.iter().map(String::as_str).unique().collect_vec();
    if ids.len() > MAX_COMPARE {
        return Err(KommunError::TooManyToCompare {
            max: MAX_COMPARE,
            requested: ids.len(),
        });
    }

    let lookups = ids.iter().map(|id| async move {
        store
            .get(id)
            .await?
            .ok_or_else(|| KommunError::NotFound((*id).to_string()))
    });

    try_join_all(lookups).await
}

/// Highest present value of `field` among the compared records
///
/// `None` when fewer than two records have a value, since there is nothing
/// to highlight then.
#[must_use]
pub fn best_value(records: &[MunicipalityRecord], field: NumericField) -> Option<f64> {
    let values = records.iter().filter_map(|r| field.value(r)).collect_vec();
    if values.len() < 2 {
        return None;
    }
    values.into_iter().reduce(f64::max)
}
