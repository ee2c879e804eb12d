//! The four demo funds shipped with the dashboard.

use crate::domain::{Fund, FundId, RiskLevel};

#[allow(clippy::too_many_arguments)]
fn fund(
    id: &str,
    code: &str,
    name: &str,
    price: f64,
    change: f64,
    market_cap: f64,
    sector: &str,
    risk_level: RiskLevel,
    description: &str,
) -> Fund {
    Fund {
        id: FundId::new(id),
        code: code.into(),
        name: name.into(),
        current_price: price,
        day_change_percent: change,
        sector: sector.into(),
        risk_level,
        market_cap,
        currency: "USD".into(),
        description: description.into(),
    }
}

pub fn demo_funds() -> Vec<Fund> {
    vec![
        fund(
            "1",
            "TECH-001",
            "Global Tech Innovators ETF",
            142.50,
            1.25,
            4500.0,
            "Technology",
            RiskLevel::High,
            "Focuses on large-cap technology companies with a high growth potential in AI and cloud computing.",
        ),
        fund(
            "2",
            "GREEN-055",
            "Sustainable Green Energy Fund",
            88.20,
            -0.45,
            1200.0,
            "Energy",
            RiskLevel::Medium,
            "Invests in renewable energy infrastructure, electric vehicles, and battery technology.",
        ),
        fund(
            "3",
            "DIV-100",
            "Blue Chip Dividend Plus",
            54.10,
            0.15,
            8900.0,
            "General",
            RiskLevel::Low,
            "A defensive portfolio focusing on established companies with a history of stable dividend payouts.",
        ),
        fund(
            "4",
            "ASIA-202",
            "Asian Emerging Markets Opps",
            32.80,
            2.10,
            2100.0,
            "Emerging Markets",
            RiskLevel::High,
            "Targets high-growth potential companies in developing Asian economies.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_funds_are_valid() {
        let funds = demo_funds();
        assert_eq!(funds.len(), 4);
        for f in &funds {
            assert!(f.validate().is_ok(), "{} invalid", f.code);
        }
        assert_eq!(funds[0].code, "TECH-001");
        assert_eq!(funds[3].day_change_percent, 2.10);
    }
}
