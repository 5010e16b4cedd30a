//! Growth of a fixed monthly contribution (SIP) compounded monthly.

use super::amortization::{compound_growth, monthly_rate};
use super::error::{CalcError, ensure_finite, ensure_positive, ensure_rate, ensure_term};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentParameters {
    pub monthly_contribution: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
}

impl InvestmentParameters {
    pub fn new(monthly_contribution: f64, annual_rate_percent: f64, term_years: u32) -> Self {
        Self {
            monthly_contribution,
            annual_rate_percent,
            term_years,
        }
    }

    pub fn validate(&self) -> Result<(), CalcError> {
        ensure_positive("monthly contribution", self.monthly_contribution)?;
        ensure_rate(self.annual_rate_percent)?;
        ensure_term(self.term_years)
    }

    pub fn total_months(&self) -> u32 {
        self.term_years.saturating_mul(12)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthEntry {
    pub year: u32,
    pub invested_to_date: f64,
    pub value_to_date: f64,
    pub growth_to_date: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthResult {
    pub total_invested: f64,
    pub total_value: f64,
    pub total_growth: f64,
    pub schedule: Vec<GrowthEntry>,
}

/// Future value of an ordinary annuity: contributions land at period end.
pub fn future_value(contribution: f64, rate: f64, periods: u32) -> f64 {
    let growth = compound_growth(rate, periods);
    if growth == 0.0 {
        return contribution * periods as f64;
    }
    contribution * growth / rate
}

pub fn compute_growth(params: &InvestmentParameters) -> Result<GrowthResult, CalcError> {
    params.validate()?;

    let rate = monthly_rate(params.annual_rate_percent);
    let months = params.total_months();
    let total_invested = params.monthly_contribution * months as f64;
    let total_value = future_value(params.monthly_contribution, rate, months);
    ensure_finite("future value", total_value)?;
    debug!(rate, months, total_value, "Computed SIP future value");

    let mut value = 0.0;
    let mut invested = 0.0;
    let mut schedule = Vec::with_capacity(params.term_years as usize);

    for year in 1..=params.term_years {
        for _ in 0..12 {
            value = value * (1.0 + rate) + params.monthly_contribution;
            invested += params.monthly_contribution;
        }
        schedule.push(GrowthEntry {
            year,
            invested_to_date: invested,
            value_to_date: value,
            growth_to_date: value - invested,
        });
    }

    Ok(GrowthResult {
        total_invested,
        total_value,
        total_growth: total_value - total_invested,
        schedule,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_horizon_sip() {
        let params = InvestmentParameters::new(5_000.0, 12.0, 35);
        let result = compute_growth(&params).unwrap();

        assert_eq!(result.total_invested, 2_100_000.0);
        let expected = 5_000.0 * (1.01_f64.powi(420) - 1.0) / 0.01;
        assert!((result.total_value - expected).abs() / expected < 1e-9);
        assert!(result.total_value > 1.7e7);
        assert!((result.total_growth - (expected - 2_100_000.0)).abs() / expected < 1e-9);
    }

    #[test]
    fn test_schedule_matches_totals() {
        let params = InvestmentParameters::new(10_000.0, 12.0, 25);
        let result = compute_growth(&params).unwrap();
        let last = result.schedule.last().unwrap();

        assert_eq!(result.schedule.len(), 25);
        assert_eq!(last.invested_to_date, result.total_invested);
        assert!((last.value_to_date - result.total_value).abs() / result.total_value < 1e-9);

        for pair in result.schedule.windows(2) {
            assert!(pair[1].value_to_date > pair[0].value_to_date);
            assert!(pair[1].growth_to_date >= pair[0].growth_to_date);
        }
    }

    #[test]
    fn test_zero_rate_has_no_growth() {
        let params = InvestmentParameters::new(2_500.0, 0.0, 3);
        let result = compute_growth(&params).unwrap();

        assert_eq!(result.total_value, 90_000.0);
        assert_eq!(result.total_growth, 0.0);
        assert_eq!(result.schedule[0].value_to_date, 30_000.0);
    }

    #[test]
    fn test_tiny_rate_keeps_contributions() {
        let params = InvestmentParameters::new(1_000.0, 1e-14, 10);
        let result = compute_growth(&params).unwrap();

        assert_eq!(result.total_invested, 120_000.0);
        assert!((result.total_value - 120_000.0).abs() < 1e-6);
        assert!(result.total_growth.abs() < 1e-6);
    }

    #[test]
    fn test_unrepresentable_growth_is_rejected() {
        let params = InvestmentParameters::new(1_000.0, 1e300, 30);
        assert!(matches!(
            compute_growth(&params),
            Err(CalcError::InvalidInput(_))
        ));
        assert!(compute_growth(&InvestmentParameters::new(1_000.0, 12.0, 101)).is_err());
    }

    #[test]
    fn test_invalid_investment_is_rejected() {
        assert!(compute_growth(&InvestmentParameters::new(0.0, 12.0, 10)).is_err());
        assert!(compute_growth(&InvestmentParameters::new(1_000.0, -2.0, 10)).is_err());
        assert!(compute_growth(&InvestmentParameters::new(1_000.0, 12.0, 0)).is_err());
    }
}
