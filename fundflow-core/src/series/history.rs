//! Random-walk NAV history.
//!
//! The walk starts 10% below the base value and drifts upward (increments are
//! drawn from `[-0.45, 0.55)` times 5% of the base), so the 30-day chart shows
//! a visible trend toward the fund's current NAV by the final point.

use chrono::{Duration, Local, NaiveDate};
use rand::Rng;

use super::{round2, SeriesError};
use crate::domain::HistoricalPoint;

/// Today plus 30 days back.
pub const DEFAULT_HISTORY_LENGTH: usize = 31;

const START_DISCOUNT: f64 = 0.9;
const DRIFT_CENTER: f64 = 0.45;
const STEP_SCALE: f64 = 0.05;
/// Running value never drops below this fraction of the base.
const FLOOR_FRACTION: f64 = 0.01;

/// Generate `length` daily points ending at `end_date`, oldest first.
///
/// Values are rounded to 2 decimals. The running value is floored at 1% of
/// `base_value`, so every emitted value is strictly positive.
pub fn generate_history<R: Rng + ?Sized>(
    base_value: f64,
    length: usize,
    end_date: NaiveDate,
    rng: &mut R,
) -> Result<Vec<HistoricalPoint>, SeriesError> {
    if length == 0 {
        return Err(SeriesError::InvalidLength);
    }
    if !base_value.is_finite() || base_value <= 0.0 {
        return Err(SeriesError::InvalidBase(base_value));
    }

    let floor = base_value * FLOOR_FRACTION;
    let mut current = base_value * START_DISCOUNT;
    let mut points = Vec::with_capacity(length);

    for days_back in (0..length).rev() {
        let change = (rng.gen::<f64>() - DRIFT_CENTER) * (base_value * STEP_SCALE);
        current = (current + change).max(floor);
        points.push(HistoricalPoint {
            date: end_date - Duration::days(days_back as i64),
            value: round2(current).max(0.01),
        });
    }

    Ok(points)
}

/// [`generate_history`] ending at today's local date.
pub fn generate_history_to_today<R: Rng + ?Sized>(
    base_value: f64,
    length: usize,
    rng: &mut R,
) -> Result<Vec<HistoricalPoint>, SeriesError> {
    generate_history(base_value, length, Local::now().date_naive(), rng)
}
