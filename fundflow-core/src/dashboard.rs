//! Dashboard assembly: catalog record to chart-ready view.

use chrono::{Local, NaiveDate, NaiveTime};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::FundRepository;
use crate::config::{ConfigError, DashboardConfig};
use crate::domain::{
    Fund, HistoricalPoint, IntradayPoint, LatestQuote, NormalizedPoint, PeerSeries,
};
use crate::hotspot::Hotspot;
use crate::rng::{RngHierarchy, Stream};
use crate::series::{
    generate_history, implied_open, normalize, simulate_intraday, FundStats, IntradayParams,
    SeriesError, DEFAULT_HISTORY_LENGTH,
};

/// Peers shown next to the selected fund.
pub const PEER_LIMIT: usize = 3;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("unknown fund '{0}'")]
    UnknownFund(String),

    #[error("fund {code}: {source}")]
    Series {
        code: String,
        #[source]
        source: SeriesError,
    },
}

/// Where a history came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HistorySource {
    Recorded,
    Synthetic,
}

/// Everything the dashboard shows for one selected fund.
#[derive(Debug, Clone, Serialize)]
pub struct FundView {
    pub fund: Fund,
    pub quote: Option<LatestQuote>,
    pub history: Vec<HistoricalPoint>,
    pub history_source: HistorySource,
    pub implied_open: f64,
    pub intraday: Vec<IntradayPoint>,
    pub peers: Vec<PeerSeries>,
    pub comparison: Vec<NormalizedPoint>,
    pub stats: FundStats,
    pub hotspot: Hotspot,
}

impl FundView {
    /// Close used for intraday and comparison: the latest quote if any.
    pub fn close(&self) -> f64 {
        self.quote
            .as_ref()
            .map_or(self.fund.current_price, |q| q.price)
    }
}

/// Builds [`FundView`]s from a repository.
pub struct DashboardBuilder<'a> {
    catalog: &'a dyn FundRepository,
    rng: RngHierarchy,
    history_length: usize,
    end_date: NaiveDate,
    trigger_time: Option<NaiveTime>,
}

impl<'a> DashboardBuilder<'a> {
    pub fn new(catalog: &'a dyn FundRepository, rng: RngHierarchy) -> Self {
        Self {
            catalog,
            rng,
            history_length: DEFAULT_HISTORY_LENGTH,
            end_date: Local::now().date_naive(),
            trigger_time: None,
        }
    }

    /// Builder configured from the `[history]`, `[intraday]` and `[rng]` sections.
    pub fn from_config(
        catalog: &'a dyn FundRepository,
        config: &DashboardConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(catalog, config.rng.hierarchy())
            .with_history_length(config.history.length)
            .with_trigger(config.intraday.trigger()?))
    }

    pub fn with_history_length(mut self, length: usize) -> Self {
        self.history_length = length;
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = end_date;
        self
    }

    pub fn with_trigger(mut self, trigger_time: Option<NaiveTime>) -> Self {
        self.trigger_time = trigger_time;
        self
    }

    /// Close and day change to simulate from: latest quote, else the listing.
    fn close_and_change(&self, fund: &Fund) -> (f64, f64) {
        match self.catalog.latest(&fund.code) {
            Some(q) => (q.price, q.change_percent),
            None => (fund.current_price, fund.day_change_percent),
        }
    }

    /// Recorded closes (last `history_length` of them), else a seeded walk
    /// ending at the listed price.
    pub fn history_for(
        &self,
        fund: &Fund,
    ) -> Result<(Vec<HistoricalPoint>, HistorySource), DashboardError> {
        if let Some(recorded) = self.catalog.recorded_history(&fund.code) {
            let skip = recorded.len().saturating_sub(self.history_length);
            return Ok((recorded[skip..].to_vec(), HistorySource::Recorded));
        }
        let mut rng = self.rng.rng_for(&fund.code, Stream::History);
        let history = generate_history(
            fund.current_price,
            self.history_length,
            self.end_date,
            &mut rng,
        )
        .map_err(|source| DashboardError::Series {
            code: fund.code.clone(),
            source,
        })?;
        Ok((history, HistorySource::Synthetic))
    }

    pub fn build(&self, code: &str) -> Result<FundView, DashboardError> {
        let fund = self
            .catalog
            .fund(code)
            .ok_or_else(|| DashboardError::UnknownFund(code.to_string()))?
            .clone();
        let series_err = |source| DashboardError::Series {
            code: fund.code.clone(),
            source,
        };

        let (history, history_source) = self.history_for(&fund)?;
        let (close, change) = self.close_and_change(&fund);
        let open = implied_open(close, change).map_err(series_err)?;

        let peer_funds = self.catalog.peers(code, PEER_LIMIT);
        let mut params = IntradayParams::new(close, open);
        if let Some(trigger) = self.trigger_time {
            params = params.with_trigger(trigger);
        }
        let mut peers = Vec::with_capacity(peer_funds.len());
        for peer in peer_funds {
            params = params.with_peer(&peer.code, self.close_and_change(peer).0);
            let (series, _) = self.history_for(peer)?;
            peers.push(PeerSeries {
                code: peer.code.clone(),
                series,
            });
        }

        let mut rng = self.rng.rng_for(&fund.code, Stream::Intraday);
        let intraday = simulate_intraday(&params, &mut rng).map_err(series_err)?;
        let comparison = normalize(&history, &peers).map_err(series_err)?;
        let stats = FundStats::compute(&fund, &history);
        let hotspot = Hotspot::with_change(&fund, change);

        tracing::debug!(
            code = %fund.code,
            points = history.len(),
            source = ?history_source,
            peers = peers.len(),
            "built fund view"
        );

        Ok(FundView {
            quote: self.catalog.latest(&fund.code).cloned(),
            fund,
            history,
            history_source,
            implied_open: open,
            intraday,
            peers,
            comparison,
            stats,
            hotspot,
        })
    }

    /// Hotspot rows for the whole catalog, in catalog order.
    pub fn hotspots(&self) -> Vec<Hotspot> {
        self.catalog
            .funds()
            .iter()
            .map(|f| Hotspot::with_change(f, self.close_and_change(f).1))
            .collect()
    }
}
