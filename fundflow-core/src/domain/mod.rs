//! Domain types for FundFlow

pub mod fund;
pub mod point;

pub use fund::{Fund, FundError, FundId, LatestQuote, RiskLevel};
pub use point::{HistoricalPoint, IntradayPoint, NormalizedPoint, PeerSeries};
