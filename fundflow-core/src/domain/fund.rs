//! Fund: the catalog record the dashboard is built around.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable catalog identifier of a fund.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FundId(pub String);

impl FundId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Risk bucket shown next to the fund name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Snapshot of a fund as listed in the catalog.
///
/// The record is treated as immutable once loaded. `current_price` is the
/// latest NAV and must be positive; `day_change_percent` is a signed
/// percentage (1.25 means +1.25%) and is never clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    pub id: FundId,
    pub code: String,
    pub name: String,
    pub current_price: f64,
    pub day_change_percent: f64,
    pub sector: String,
    pub risk_level: RiskLevel,
    /// Market capitalisation in millions of `currency`.
    pub market_cap: f64,
    pub currency: String,
    pub description: String,
}

impl Fund {
    /// True when today's change is zero or positive (drives chart colour).
    pub fn is_up_day(&self) -> bool {
        self.day_change_percent >= 0.0
    }

    /// Check the numeric invariants of the record.
    pub fn validate(&self) -> Result<(), FundError> {
        if !self.current_price.is_finite() || self.current_price <= 0.0 {
            return Err(FundError::NonPositivePrice {
                code: self.code.clone(),
                price: self.current_price,
            });
        }
        if !self.day_change_percent.is_finite() {
            return Err(FundError::NonFinite {
                code: self.code.clone(),
                field: "day_change_percent",
            });
        }
        if !self.market_cap.is_finite() {
            return Err(FundError::NonFinite {
                code: self.code.clone(),
                field: "market_cap",
            });
        }
        if self.code.trim().is_empty() {
            return Err(FundError::EmptyCode { id: self.id.clone() });
        }
        Ok(())
    }
}

/// Latest recorded quote from the richer per-fund data table.
///
/// When present it takes precedence over the fund's listed price and change
/// for intraday simulation and peer comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestQuote {
    pub price: f64,
    pub change_percent: f64,
    #[serde(default)]
    pub volume: Option<u64>,
    pub date: NaiveDate,
}

/// Invalid fund record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FundError {
    #[error("fund {code}: current price must be positive, got {price}")]
    NonPositivePrice { code: String, price: f64 },

    #[error("fund {code}: {field} is not a finite number")]
    NonFinite { code: String, field: &'static str },

    #[error("fund {id}: code is empty")]
    EmptyCode { id: FundId },
}

#[cfg(test)]
pub(crate) fn test_fund(code: &str, price: f64, change: f64) -> Fund {
    Fund {
        id: FundId::new(code),
        code: code.to_string(),
        name: format!("{code} Test Fund"),
        current_price: price,
        day_change_percent: change,
        sector: "Technology".to_string(),
        risk_level: RiskLevel::Medium,
        market_cap: 1000.0,
        currency: "USD".to_string(),
        description: "Test fixture".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_fund_passes() {
        assert!(test_fund("TECH-001", 142.5, 1.25).validate().is_ok());
    }

    #[test]
    fn zero_price_rejected() {
        let err = test_fund("TECH-001", 0.0, 1.25).validate().unwrap_err();
        assert!(matches!(err, FundError::NonPositivePrice { .. }));
    }

    #[test]
    fn nan_change_rejected() {
        let err = test_fund("TECH-001", 10.0, f64::NAN).validate().unwrap_err();
        assert_eq!(
            err,
            FundError::NonFinite {
                code: "TECH-001".into(),
                field: "day_change_percent"
            }
        );
    }

    #[test]
    fn up_day_includes_flat() {
        assert!(test_fund("A", 1.0, 0.0).is_up_day());
        assert!(!test_fund("A", 1.0, -0.01).is_up_day());
    }
}
