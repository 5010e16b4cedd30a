//! Market snapshot assembly with static last-known values.
//!
//! The quote service only returns what it could fetch. A snapshot always has
//! one row per requested symbol: live when a quote exists, otherwise the
//! static value below.

use super::quote::Quote;
use super::symbols;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticQuote {
    pub symbol: &'static str,
    pub value: f64,
    pub change: f64,
    pub change_percent: f64,
}

const fn fixed(symbol: &'static str, value: f64, change: f64, change_percent: f64) -> StaticQuote {
    StaticQuote {
        symbol,
        value,
        change,
        change_percent,
    }
}

pub const STATIC_MARKET_DATA: [StaticQuote; 10] = [
    fixed("NIFTY50", 22145.70, 125.30, 0.57),
    fixed("SENSEX", 73088.33, 428.75, 0.59),
    fixed("BANKNIFTY", 47225.15, -132.45, -0.28),
    fixed("NIFTYIT", 35890.25, 245.80, 0.69),
    fixed("SPX", 4783.45, 22.15, 0.47),
    fixed("DJI", 37305.16, 157.06, 0.42),
    fixed("IXIC", 14813.92, 85.28, 0.58),
    fixed("BTC", 43250.78, -523.45, -1.20),
    fixed("USDINR", 83.15, 0.05, 0.06),
    fixed("GOLD", 62475.0, 125.0, 0.20),
];

pub fn static_quote(symbol: &str) -> Option<&'static StaticQuote> {
    STATIC_MARKET_DATA.iter().find(|q| q.symbol == symbol)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    Live,
    Static,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotRow {
    pub symbol: String,
    pub name: String,
    pub value: f64,
    pub change: f64,
    pub change_percent: f64,
    pub source: QuoteSource,
}

/// One row per symbol, in request order. Symbols without a live quote use
/// the static dataset; symbols absent from both are zeroed and marked
/// unavailable.
pub fn build_snapshot<S: AsRef<str>>(
    codes: &[S],
    quotes: &HashMap<String, Quote>,
) -> Vec<SnapshotRow> {
    codes
        .iter()
        .map(|code| {
            let symbol = code.as_ref();
            let name = symbols::display_name(symbol).to_string();
            let (value, change, change_percent, source) =
                match (quotes.get(symbol), static_quote(symbol)) {
                    (Some(q), _) => (q.price, q.change, q.change_percent, QuoteSource::Live),
                    (None, Some(s)) => (s.value, s.change, s.change_percent, QuoteSource::Static),
                    (None, None) => (0.0, 0.0, 0.0, QuoteSource::Unavailable),
                };
            SnapshotRow {
                symbol: symbol.to_string(),
                name,
                value,
                change,
                change_percent,
                source,
            }
        })
        .collect()
}
