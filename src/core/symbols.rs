//! Translation from internal market codes to provider tickers.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketSymbol {
    pub code: &'static str,
    pub alpha_ticker: &'static str,
    pub yahoo_ticker: &'static str,
    pub name: &'static str,
}

const fn entry(
    code: &'static str,
    alpha_ticker: &'static str,
    yahoo_ticker: &'static str,
    name: &'static str,
) -> MarketSymbol {
    MarketSymbol {
        code,
        alpha_ticker,
        yahoo_ticker,
        name,
    }
}

pub const SYMBOLS: [MarketSymbol; 10] = [
    entry("NIFTY50", "^NSEI", "^NSEI", "Nifty 50"),
    entry("SENSEX", "^BSESN", "^BSESN", "Sensex"),
    entry("BANKNIFTY", "NIFTY_BANK.BSE", "^NSEBANK", "Bank Nifty"),
    entry("NIFTYIT", "NIFTY_IT.NSE", "^CNXIT", "Nifty IT"),
    entry("SPX", "SPX", "^GSPC", "S&P 500"),
    entry("DJI", "DJI", "^DJI", "Dow Jones"),
    entry("IXIC", "IXIC", "^IXIC", "Nasdaq"),
    entry("BTC", "BTCUSD", "BTC-USD", "Bitcoin"),
    entry("USDINR", "USD", "USDINR=X", "USD/INR"),
    entry("GOLD", "GOLD", "GC=F", "Gold"),
];

pub const GLOBAL_GROUP: [&str; 6] = ["SPX", "DJI", "IXIC", "BTC", "USDINR", "GOLD"];
pub const INDIA_GROUP: [&str; 4] = ["NIFTY50", "SENSEX", "BANKNIFTY", "NIFTYIT"];

pub fn lookup(code: &str) -> Option<&'static MarketSymbol> {
    SYMBOLS.iter().find(|s| s.code == code)
}

pub fn display_name(code: &str) -> &str {
    lookup(code).map_or(code, |s| s.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let bank = lookup("BANKNIFTY").unwrap();
        assert_eq!(bank.alpha_ticker, "NIFTY_BANK.BSE");
        assert_eq!(bank.yahoo_ticker, "^NSEBANK");
        assert!(lookup("NOPE").is_none());
        assert_eq!(display_name("GOLD"), "Gold");
        assert_eq!(display_name("NOPE"), "NOPE");
    }

    #[test]
    fn test_groups_are_known_symbols() {
        for code in GLOBAL_GROUP.iter().chain(INDIA_GROUP.iter()) {
            assert!(lookup(code).is_some(), "{code} missing from table");
        }
    }
}
