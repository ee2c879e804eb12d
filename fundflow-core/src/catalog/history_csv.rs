//! Recorded closes from `date,value` CSV files.

use std::path::Path;

use super::CatalogError;
use crate::domain::HistoricalPoint;

/// Read one fund's recorded closes. The result is sorted by date.
pub fn read_history_csv(code: &str, path: &Path) -> Result<Vec<HistoricalPoint>, CatalogError> {
    let invalid = |message: String| CatalogError::InvalidHistory {
        code: code.to_string(),
        message,
    };

    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| invalid(format!("open {}: {e}", path.display())))?;

    let mut points = Vec::new();
    for (row, record) in reader.deserialize::<HistoricalPoint>().enumerate() {
        // +2: header line, 1-based rows
        let point = record.map_err(|e| invalid(format!("line {}: {e}", row + 2)))?;
        points.push(point);
    }

    check_points(code, &points)?;
    points.sort_by_key(|p| p.date);
    Ok(points)
}

/// Recorded closes must be non-empty and strictly positive.
pub(crate) fn check_points(code: &str, points: &[HistoricalPoint]) -> Result<(), CatalogError> {
    if points.is_empty() {
        return Err(CatalogError::InvalidHistory {
            code: code.to_string(),
            message: "no data rows".into(),
        });
    }
    if let Some(bad) = points
        .iter()
        .find(|p| !p.value.is_finite() || p.value <= 0.0)
    {
        return Err(CatalogError::InvalidHistory {
            code: code.to_string(),
            message: format!("non-positive close {} on {}", bad.value, bad.date),
        });
    }
    Ok(())
}
