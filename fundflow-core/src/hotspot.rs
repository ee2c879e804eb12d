//! Hotspot classification of a fund's day change.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::Fund;

/// Volatility bucket of a day change.
///
/// Named after the monitoring workflow: big moves are still pending review,
/// moderate ones are being processed, small ones need no action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HotspotStatus {
    Pending,
    Processing,
    Completed,
}

impl HotspotStatus {
    pub fn from_change(change_percent: f64) -> Self {
        let magnitude = change_percent.abs();
        if magnitude > 2.0 {
            HotspotStatus::Pending
        } else if magnitude > 1.0 {
            HotspotStatus::Processing
        } else {
            HotspotStatus::Completed
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HotspotStatus::Pending => "High volatility",
            HotspotStatus::Processing => "Elevated",
            HotspotStatus::Completed => "Normal",
        }
    }
}

impl fmt::Display for HotspotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Short human-readable reason for a day change.
pub fn trigger_reason(change_percent: f64) -> &'static str {
    if change_percent > 3.0 {
        "Sharp rally on heavy buying"
    } else if change_percent > 1.0 {
        "Counter-trend gain against the market"
    } else if change_percent > 0.0 {
        "Mild gain in line with sector"
    } else if change_percent > -1.0 {
        "Range-bound, no clear direction"
    } else if change_percent > -3.0 {
        "Pullback pressure from profit-taking"
    } else {
        "Sharp decline on broad selling"
    }
}

/// One row of the hotspot list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub code: String,
    pub name: String,
    pub status: HotspotStatus,
    pub reason: String,
    /// Signed day change, e.g. `+1.25%`.
    pub metric: String,
}

impl Hotspot {
    pub fn for_fund(fund: &Fund) -> Self {
        Self::with_change(fund, fund.day_change_percent)
    }

    /// Classify `fund` using a change other than its listed one (a latest quote).
    pub fn with_change(fund: &Fund, change: f64) -> Self {
        Self {
            code: fund.code.clone(),
            name: fund.name.clone(),
            status: HotspotStatus::from_change(change),
            reason: trigger_reason(change).to_string(),
            metric: format_signed_pct(change),
        }
    }
}

/// `+1.25%` / `-0.45%`; zero is shown with a plus sign.
pub fn format_signed_pct(value: f64) -> String {
    if value >= 0.0 {
        format!("+{value:.2}%")
    } else {
        format!("{value:.2}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fund::test_fund;

    #[test]
    fn status_thresholds() {
        assert_eq!(HotspotStatus::from_change(2.1), HotspotStatus::Pending);
        assert_eq!(HotspotStatus::from_change(-2.5), HotspotStatus::Pending);
        assert_eq!(HotspotStatus::from_change(2.0), HotspotStatus::Processing);
        assert_eq!(HotspotStatus::from_change(-1.5), HotspotStatus::Processing);
        assert_eq!(HotspotStatus::from_change(1.0), HotspotStatus::Completed);
        assert_eq!(HotspotStatus::from_change(0.0), HotspotStatus::Completed);
    }

    #[test]
    fn reason_thresholds() {
        assert!(trigger_reason(3.5).starts_with("Sharp rally"));
        assert!(trigger_reason(3.0).starts_with("Counter-trend"));
        assert!(trigger_reason(0.5).starts_with("Mild gain"));
        assert!(trigger_reason(0.0).starts_with("Range-bound"));
        assert!(trigger_reason(-1.0).starts_with("Pullback"));
        assert!(trigger_reason(-3.0).starts_with("Sharp decline"));
    }

    #[test]
    fn hotspot_metric_is_signed() {
        let up = Hotspot::for_fund(&test_fund("A", 10.0, 1.25));
        assert_eq!(up.metric, "+1.25%");
        assert_eq!(up.status, HotspotStatus::Processing);

        let down = Hotspot::for_fund(&test_fund("B", 10.0, -0.45));
        assert_eq!(down.metric, "-0.45%");
        assert_eq!(down.status, HotspotStatus::Completed);
    }
}
