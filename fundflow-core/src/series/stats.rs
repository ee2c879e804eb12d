//! Descriptive statistics shown on the stats card.

use serde::{Deserialize, Serialize};

use super::round2;
use crate::domain::{Fund, HistoricalPoint};

/// Estimated 52-week band, relative to the current price.
pub const HIGH_52W_FACTOR: f64 = 1.12;
pub const LOW_52W_FACTOR: f64 = 0.85;

/// Stats card for one fund over the displayed history window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundStats {
    pub market_cap: f64,
    pub currency: String,
    /// Estimated, not observed: the catalog carries no year of data.
    pub high_52w: f64,
    pub low_52w: f64,
    pub period_high: Option<f64>,
    pub period_low: Option<f64>,
    /// First to last point of the window, in percent.
    pub period_return_pct: Option<f64>,
    pub points: usize,
}

impl FundStats {
    pub fn compute(fund: &Fund, history: &[HistoricalPoint]) -> Self {
        let period_high = history.iter().map(|p| p.value).reduce(f64::max);
        let period_low = history.iter().map(|p| p.value).reduce(f64::min);

        let period_return_pct = match (history.first(), history.last()) {
            (Some(first), Some(last)) if first.value != 0.0 => {
                Some(round2((last.value - first.value) / first.value * 100.0))
            }
            _ => None,
        };

        Self {
            market_cap: fund.market_cap,
            currency: fund.currency.clone(),
            high_52w: round2(fund.current_price * HIGH_52W_FACTOR),
            low_52w: round2(fund.current_price * LOW_52W_FACTOR),
            period_high,
            period_low,
            period_return_pct,
            points: history.len(),
        }
    }
}
