//! Calculators, quote retrieval and their shared types

pub mod amortization;
pub mod cache;
pub mod config;
pub mod error;
pub mod growth;
pub mod log;
pub mod market;
pub mod quote;
pub mod snapshot;
pub mod symbols;

// Re-export main types for cleaner imports
pub use amortization::{AmortizationResult, LoanParameters, PeriodEntry, compute_loan_amortization};
pub use error::CalcError;
pub use growth::{GrowthResult, InvestmentParameters, compute_growth};
pub use market::MarketQuoteService;
pub use quote::{ProviderError, Quote, QuoteProvider};
