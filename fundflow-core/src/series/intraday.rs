//! Intraday simulator: two trading sessions of one-minute ticks.
//!
//! The primary value walks linearly from the implied open toward the known
//! close with uniform noise; peers random-walk around their own closes
//! without a trend. The last tick is pinned to the recorded close so the
//! intraday chart always ends on the real price.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveTime};
use rand::Rng;

use super::{round4, SeriesError};
use crate::domain::IntradayPoint;

/// Ticks per session, both session boundaries included (09:30..=11:30, 13:00..=15:00).
pub const TICKS_PER_SESSION: usize = 121;

/// Trend steps across the trading day (two 120-minute sessions).
const TREND_STEPS: f64 = 240.0;
const PRICE_NOISE: f64 = 0.002;
const INDICATIVE_NOISE: f64 = 0.0005;
const PEER_NOISE: f64 = 0.001;
const MAX_VOLUME: u32 = 1000;

/// Inputs to [`simulate_intraday`].
#[derive(Debug, Clone, PartialEq)]
pub struct IntradayParams {
    pub close: f64,
    pub implied_open: f64,
    pub peer_closes: BTreeMap<String, f64>,
    /// Tick to flag as the alert trigger, if any.
    pub trigger_time: Option<NaiveTime>,
}

impl IntradayParams {
    pub fn new(close: f64, implied_open: f64) -> Self {
        Self {
            close,
            implied_open,
            peer_closes: BTreeMap::new(),
            trigger_time: None,
        }
    }

    pub fn with_peer(mut self, code: impl Into<String>, close: f64) -> Self {
        self.peer_closes.insert(code.into(), close);
        self
    }

    pub fn with_trigger(mut self, time: NaiveTime) -> Self {
        self.trigger_time = Some(time);
        self
    }
}

/// Session start times, morning then afternoon.
fn session_starts() -> [NaiveTime; 2] {
    [
        NaiveTime::from_hms_opt(9, 30, 0).unwrap_or(NaiveTime::MIN),
        NaiveTime::from_hms_opt(13, 0, 0).unwrap_or(NaiveTime::MIN),
    ]
}

/// Simulate `2 * TICKS_PER_SESSION` chronologically ordered ticks.
///
/// `value` and `indicative_value` are rounded to 4 decimals; the final
/// tick's `value` equals `params.close` exactly.
pub fn simulate_intraday<R: Rng + ?Sized>(
    params: &IntradayParams,
    rng: &mut R,
) -> Result<Vec<IntradayPoint>, SeriesError> {
    let close = params.close;
    if !close.is_finite() || close <= 0.0 {
        return Err(SeriesError::InvalidBase(close));
    }
    if !params.implied_open.is_finite() {
        return Err(SeriesError::InvalidBase(params.implied_open));
    }

    let step = (close - params.implied_open) / TREND_STEPS;
    // A peer without a usable close walks around 1.0.
    let peer_closes: Vec<(&str, f64)> = params
        .peer_closes
        .iter()
        .map(|(code, &c)| (code.as_str(), if c.is_finite() && c > 0.0 { c } else { 1.0 }))
        .collect();

    let mut value = params.implied_open;
    let mut points = Vec::with_capacity(TICKS_PER_SESSION * 2);

    for start in session_starts() {
        for minute in 0..TICKS_PER_SESSION {
            let time = start + Duration::minutes(minute as i64);

            value += step + (rng.gen::<f64>() - 0.5) * (close * PRICE_NOISE);
            let indicative = value * (1.0 + (rng.gen::<f64>() - 0.5) * INDICATIVE_NOISE);

            let peer_values = peer_closes
                .iter()
                .map(|&(code, peer_close)| {
                    let v = peer_close * (1.0 + (rng.gen::<f64>() - 0.5) * PEER_NOISE);
                    (code.to_string(), v)
                })
                .collect();

            points.push(IntradayPoint {
                time,
                value: round4(value),
                indicative_value: round4(indicative),
                peer_values,
                volume: rng.gen_range(0..MAX_VOLUME),
                is_trigger: params.trigger_time == Some(time),
            });
        }
    }

    if let Some(last) = points.last_mut() {
        last.value = close;
    }

    Ok(points)
}
