//! Baseline resolver: implied period-start price.

use super::SeriesError;

/// Price at period start implied by `close` and its percentage change.
///
/// `close / (1 + change_percent / 100)`. A -100% change implies a zero
/// close and has no defined open, so it is rejected.
pub fn implied_open(close: f64, change_percent: f64) -> Result<f64, SeriesError> {
    let factor = 1.0 + change_percent / 100.0;
    if factor == 0.0 {
        return Err(SeriesError::InvalidChange { change_percent });
    }
    let open = close / factor;
    if !open.is_finite() {
        return Err(SeriesError::InvalidChange { change_percent });
    }
    Ok(open)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_change_is_identity() {
        assert_eq!(implied_open(100.0, 0.0).unwrap(), 100.0);
    }

    #[test]
    fn positive_change_lowers_open() {
        let open = implied_open(142.5, 1.25).unwrap();
        assert!(open < 142.5);
        assert!((open * 1.0125 - 142.5).abs() < 1e-9);
    }

    #[test]
    fn minus_hundred_rejected() {
        assert_eq!(
            implied_open(100.0, -100.0),
            Err(SeriesError::InvalidChange {
                change_percent: -100.0
            })
        );
    }

    #[test]
    fn nan_change_rejected() {
        assert!(implied_open(100.0, f64::NAN).is_err());
    }
}
