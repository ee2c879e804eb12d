//! Series points: the chart-ready rows produced by the generators.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One day of a NAV (or percentage) series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl HistoricalPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// One simulated minute of a trading session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradayPoint {
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub value: f64,
    /// Indicative optimal portfolio value (IOPV) tracked alongside `value`.
    pub indicative_value: f64,
    pub peer_values: BTreeMap<String, f64>,
    pub volume: u32,
    pub is_trigger: bool,
}

/// A peer entity's own price series, aligned to the primary by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerSeries {
    pub code: String,
    pub series: Vec<HistoricalPoint>,
}

/// Percentage change from period start for the primary and each peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub date: NaiveDate,
    pub pct_change: f64,
    pub peers: BTreeMap<String, f64>,
}

/// `HH:MM` wire format for session times.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
