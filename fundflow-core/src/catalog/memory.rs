//! In-memory catalog loaded from the built-in list or a TOML file.

use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use super::{builtin, history_csv, CatalogError, FundRepository};
use crate::domain::{Fund, HistoricalPoint, LatestQuote};

/// On-disk catalog layout.
///
/// ```toml
/// [[funds]]
/// id = "1"
/// code = "TECH-001"
/// # ...
///
/// [latest."TECH-001"]
/// price = 143.1
/// change_percent = 1.6
/// date = "2025-06-30"
/// ```
#[derive(Debug, Deserialize)]
struct CatalogFile {
    funds: Vec<Fund>,
    #[serde(default)]
    latest: BTreeMap<String, LatestQuote>,
}

/// Catalog held entirely in memory; immutable once built.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    funds: Vec<Fund>,
    latest: BTreeMap<String, LatestQuote>,
    history: BTreeMap<String, Vec<HistoricalPoint>>,
}

impl InMemoryCatalog {
    /// Validate and index a list of funds.
    pub fn new(funds: Vec<Fund>) -> Result<Self, CatalogError> {
        if funds.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for fund in &funds {
            fund.validate()?;
            if !seen.insert(fund.code.as_str()) {
                return Err(CatalogError::DuplicateCode(fund.code.clone()));
            }
        }
        Ok(Self {
            funds,
            latest: BTreeMap::new(),
            history: BTreeMap::new(),
        })
    }

    /// The demo catalog.
    pub fn builtin() -> Self {
        Self {
            funds: builtin::demo_funds(),
            latest: BTreeMap::new(),
            history: BTreeMap::new(),
        }
    }

    /// Load a catalog from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a catalog from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;
        let mut catalog = Self::new(file.funds)?;
        for (code, quote) in file.latest {
            catalog = catalog.with_latest(&code, quote)?;
        }
        Ok(catalog)
    }

    /// Attach a latest quote to a catalog fund.
    pub fn with_latest(mut self, code: &str, quote: LatestQuote) -> Result<Self, CatalogError> {
        self.require(code)?;
        if !quote.price.is_finite() || quote.price <= 0.0 || !quote.change_percent.is_finite() {
            return Err(CatalogError::InvalidHistory {
                code: code.to_string(),
                message: format!(
                    "latest quote must have a positive price and finite change, got {} / {}",
                    quote.price, quote.change_percent
                ),
            });
        }
        self.latest.insert(code.to_string(), quote);
        Ok(self)
    }

    /// Attach recorded closes to a catalog fund. Points are sorted by date.
    pub fn with_history(
        mut self,
        code: &str,
        mut points: Vec<HistoricalPoint>,
    ) -> Result<Self, CatalogError> {
        self.require(code)?;
        history_csv::check_points(code, &points)?;
        points.sort_by_key(|p| p.date);
        self.history.insert(code.to_string(), points);
        Ok(self)
    }

    /// Load `<CODE>.csv` files from `dir` for every catalog fund that has one.
    ///
    /// Funds without a file keep synthetic history. Files that match no
    /// catalog code are ignored.
    pub fn load_history_dir(mut self, dir: &Path) -> Result<Self, CatalogError> {
        let codes: Vec<String> = self.funds.iter().map(|f| f.code.clone()).collect();
        for code in codes {
            let path = dir.join(format!("{code}.csv"));
            if !path.is_file() {
                tracing::debug!(code = %code, path = %path.display(), "no recorded history");
                continue;
            }
            let points = history_csv::read_history_csv(&code, &path)?;
            tracing::info!(code = %code, points = points.len(), "loaded recorded history");
            self = self.with_history(&code, points)?;
        }
        Ok(self)
    }

    fn require(&self, code: &str) -> Result<(), CatalogError> {
        if self.funds.iter().any(|f| f.code == code) {
            Ok(())
        } else {
            Err(CatalogError::UnknownCode(code.to_string()))
        }
    }
}

impl FundRepository for InMemoryCatalog {
    fn funds(&self) -> &[Fund] {
        &self.funds
    }

    fn latest(&self, code: &str) -> Option<&LatestQuote> {
        self.latest.get(code)
    }

    fn recorded_history(&self, code: &str) -> Option<&[HistoricalPoint]> {
        self.history.get(code).map(|v| v.as_slice())
    }
}
