//! Synthetic and derived time series.
//!
//! Everything here is a small pure computation over in-memory arrays:
//! - `baseline`: implied period-start price from a close and its change
//! - `history`: trended random-walk NAV history
//! - `intraday`: two-session minute ticks closing at the recorded price
//! - `normalize`: percentage change from period start, primary + peers
//! - `stats`: descriptive statistics for the stats card

pub mod baseline;
pub mod history;
pub mod intraday;
pub mod normalize;
pub mod stats;

pub use baseline::implied_open;
pub use history::{generate_history, generate_history_to_today, DEFAULT_HISTORY_LENGTH};
pub use intraday::{simulate_intraday, IntradayParams, TICKS_PER_SESSION};
pub use normalize::normalize;
pub use stats::FundStats;

use thiserror::Error;

/// Degenerate numeric input to a generator or the normalization pipeline.
///
/// These are precondition failures: well-formed catalog data never produces
/// them, and they are rejected before anything reaches a chart.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("change of {change_percent}% has no implied period-start price")]
    InvalidChange { change_percent: f64 },

    #[error("period-start value of '{entity}' is zero; percentage change is undefined")]
    ZeroBaseline { entity: String },

    #[error("series is empty")]
    EmptySeries,

    #[error("series length must be positive")]
    InvalidLength,

    #[error("base value must be positive and finite, got {0}")]
    InvalidBase(f64),
}

/// Round to 2 decimal places.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Round to 4 decimal places.
pub(crate) fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(-1.005_1), -1.01);
        assert_eq!(round4(1.234_56), 1.2346);
    }
}
