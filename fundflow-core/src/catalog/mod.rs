//! Fund catalog: the static input the dashboard is built from.
//!
//! The `FundRepository` trait abstracts over where the records come from
//! (the built-in demo list, a TOML catalog file, recorded CSV closes) so the
//! dashboard and tests can swap implementations.

pub mod builtin;
pub mod history_csv;
pub mod memory;

pub use history_csv::read_history_csv;
pub use memory::InMemoryCatalog;

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{Fund, FundError, HistoricalPoint, LatestQuote};

/// Errors raised while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse catalog TOML: {0}")]
    Parse(String),

    #[error(transparent)]
    InvalidFund(#[from] FundError),

    #[error("duplicate fund code '{0}'")]
    DuplicateCode(String),

    #[error("catalog has no funds")]
    Empty,

    #[error("'{0}' is not in the catalog")]
    UnknownCode(String),

    #[error("history for '{code}': {message}")]
    InvalidHistory { code: String, message: String },
}

/// Read-only access to fund records.
pub trait FundRepository: Send + Sync {
    /// All funds, in catalog order.
    fn funds(&self) -> &[Fund];

    /// Latest recorded quote for a fund, if the catalog has one.
    fn latest(&self, code: &str) -> Option<&LatestQuote>;

    /// Recorded closes for a fund, oldest first, if the catalog has them.
    fn recorded_history(&self, code: &str) -> Option<&[HistoricalPoint]>;

    fn fund(&self, code: &str) -> Option<&Fund> {
        self.funds().iter().find(|f| f.code == code)
    }

    /// The other funds in catalog order, up to `limit`. Never includes `code`.
    fn peers(&self, code: &str, limit: usize) -> Vec<&Fund> {
        self.funds()
            .iter()
            .filter(|f| f.code != code)
            .take(limit)
            .collect()
    }
}
