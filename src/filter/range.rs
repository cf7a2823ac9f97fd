//! Closed numeric ranges

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{KommunError, Result};

/// Closed interval `[lo, hi]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct Range {
    lo: f64,
    hi: f64,
}

impl Range {
    /// Create a range, rejecting NaN bounds and `lo > hi`
    pub fn new(lo: f64, hi: f64) -> Result<Self> {
        if lo.is_nan() || hi.is_nan() {
            return Err(KommunError::InvalidRange(format!(
                "bounds must be numbers, got [{lo}, {hi}]"
            )));
        }
        if lo > hi {
            return Err(KommunError::InvalidRange(format!(
                "lower bound {lo} is greater than upper bound {hi}"
            )));
        }
        Ok(Self { lo, hi })
    }

    /// `[0, hi]` for a known non-negative ceiling
    pub(crate) const fn up_to(hi: f64) -> Self {
        Self { lo: 0.0, hi }
    }

    #[must_use]
    pub const fn lo(&self) -> f64 {
        self.lo
    }

    #[must_use]
    pub const fn hi(&self) -> f64 {
        self.hi
    }

    /// Inclusive membership test
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && value <= self.hi
    }
}

impl TryFrom<(f64, f64)> for Range {
    type Error = KommunError;

    fn try_from((lo, hi): (f64, f64)) -> Result<Self> {
        Self::new(lo, hi)
    }
}

impl From<Range> for (f64, f64) {
    fn from(range: Range) -> Self {
        (range.lo, range.hi)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.lo, self.hi)
    }
}

impl FromStr for Range {
    type Err = KommunError;

    /// Parse `"lo..hi"`; either bound may be omitted (`"50.."`, `"..100"`)
    fn from_str(s: &str) -> Result<Self> {
        let (lo, hi) = s
            .trim()
            .split_once("..")
            .ok_or_else(|| KommunError::InvalidRange(format!("expected 'lo..hi', got '{s}'")))?;

        let parse_bound = |bound: &str, default: f64| -> Result<f64> {
            let bound = bound.trim();
            if bound.is_empty() {
                return Ok(default);
            }
            bound
                .parse::<f64>()
                .map_err(|_| KommunError::InvalidRange(format!("'{bound}' is not a number")))
        };

        Self::new(parse_bound(lo, 0.0)?, parse_bound(hi, f64::INFINITY)?)
    }
}
