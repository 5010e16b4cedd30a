//! Reducing-balance loan amortization.
//!
//! All figures are kept unrounded. Rounding to the currency's minor unit is a
//! presentation concern and happens only when yearly aggregates are rendered.

use super::error::{CalcError, ensure_finite, ensure_positive, ensure_rate, ensure_term};
use serde::{Deserialize, Serialize};
use tracing::debug;

const MONTHS_PER_YEAR: u32 = 12;

/// Amounts offered as lump-sum prepayment candidates by the loan calculator.
pub const DEFAULT_PREPAYMENTS: [f64; 3] = [10_000.0, 25_000.0, 50_000.0];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
}

impl LoanParameters {
    pub fn new(principal: f64, annual_rate_percent: f64, term_years: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_years,
        }
    }

    pub fn validate(&self) -> Result<(), CalcError> {
        ensure_positive("principal", self.principal)?;
        ensure_rate(self.annual_rate_percent)?;
        ensure_term(self.term_years)
    }

    pub fn monthly_rate(&self) -> f64 {
        monthly_rate(self.annual_rate_percent)
    }

    pub fn total_periods(&self) -> u32 {
        self.term_years.saturating_mul(MONTHS_PER_YEAR)
    }
}

/// Typical loan shapes used as starting points by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanPreset {
    Home,
    Car,
}

impl LoanPreset {
    pub fn parameters(&self) -> LoanParameters {
        match self {
            LoanPreset::Home => LoanParameters::new(2_500_000.0, 8.5, 20),
            LoanPreset::Car => LoanParameters::new(800_000.0, 10.5, 7),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodEntry {
    pub period: u32,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub remaining_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub periodic_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub schedule: Vec<PeriodEntry>,
}

impl AmortizationResult {
    /// First year in which the principal component outweighs the interest
    /// component.
    pub fn crossover_period(&self) -> Option<u32> {
        self.schedule
            .iter()
            .find(|entry| entry.principal_paid > entry.interest_paid)
            .map(|entry| entry.period)
    }

    /// Total interest as a percentage of the borrowed principal.
    pub fn interest_to_principal_ratio(&self, principal: f64) -> f64 {
        self.total_interest / principal * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentImpact {
    pub prepayment: f64,
    pub new_payment: f64,
    pub payment_reduction: f64,
    pub interest_saved: f64,
}

pub(crate) fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 12.0 / 100.0
}

/// `(1 + rate)^periods - 1`, computed without losing tiny rates to rounding.
pub(crate) fn compound_growth(rate: f64, periods: u32) -> f64 {
    (periods as f64 * rate.ln_1p()).exp_m1()
}

/// Annuity payment for `principal` repaid over `periods` at `rate` per period.
/// Falls back to equal installments when the rate produces no growth.
pub fn periodic_payment(principal: f64, rate: f64, periods: u32) -> f64 {
    let growth = compound_growth(rate, periods);
    if growth == 0.0 {
        return principal / periods as f64;
    }
    principal * rate * (growth + 1.0) / growth
}

/// Computes the EMI and a year-by-year breakdown of a reducing-balance loan.
pub fn compute_loan_amortization(
    params: &LoanParameters,
) -> Result<AmortizationResult, CalcError> {
    params.validate()?;

    let rate = params.monthly_rate();
    let periods = params.total_periods();
    let payment = periodic_payment(params.principal, rate, periods);
    ensure_finite("periodic payment", payment)?;
    debug!(
        principal = params.principal,
        rate, periods, payment, "Computed periodic payment"
    );

    let mut balance = params.principal;
    let mut schedule = Vec::with_capacity(params.term_years as usize);

    for year in 1..=params.term_years {
        let mut principal_paid = 0.0;
        let mut interest_paid = 0.0;

        for _ in 0..MONTHS_PER_YEAR {
            let interest = balance * rate;
            let principal = payment - interest;
            interest_paid += interest;
            principal_paid += principal;
            balance -= principal;
        }

        let remaining_balance = if year == params.term_years {
            0.0
        } else {
            balance.max(0.0)
        };

        schedule.push(PeriodEntry {
            period: year,
            principal_paid,
            interest_paid,
            remaining_balance,
        });
    }

    let total_payment = payment * periods as f64;
    ensure_finite("total payment", total_payment)?;
    for entry in &schedule {
        ensure_finite("interest paid", entry.interest_paid)?;
        ensure_finite("principal paid", entry.principal_paid)?;
    }
    Ok(AmortizationResult {
        periodic_payment: payment,
        total_payment,
        total_interest: total_payment - params.principal,
        schedule,
    })
}

/// Effect of paying `prepayment` up front: same rate and term, smaller
/// principal.
pub fn prepayment_impact(
    params: &LoanParameters,
    result: &AmortizationResult,
    prepayment: f64,
) -> Result<PrepaymentImpact, CalcError> {
    params.validate()?;
    ensure_positive("prepayment", prepayment)?;
    if prepayment >= params.principal {
        return Err(CalcError::invalid(format!(
            "prepayment {prepayment} must be less than the principal {}",
            params.principal
        )));
    }

    let periods = params.total_periods();
    let new_payment = periodic_payment(
        params.principal - prepayment,
        params.monthly_rate(),
        periods,
    );
    ensure_finite("new payment", new_payment)?;
    let payment_reduction = result.periodic_payment - new_payment;

    Ok(PrepaymentImpact {
        prepayment,
        new_payment,
        payment_reduction,
        interest_saved: payment_reduction * periods as f64,
    })
}

pub fn prepayment_scenarios(
    params: &LoanParameters,
    result: &AmortizationResult,
    amounts: &[f64],
) -> Result<Vec<PrepaymentImpact>, CalcError> {
    amounts
        .iter()
        .map(|amount| prepayment_impact(params, result, *amount))
        .collect()
}
