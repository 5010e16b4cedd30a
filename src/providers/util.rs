use std::time::Duration;

pub const USER_AGENT: &str = "finsnap/1.0";

/// Request timeout applied to every outbound client unless configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds an HTTP client with an explicit request timeout.
pub fn http_client(user_agent: &str, timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
}

/// Parses a numeric field that upstream APIs send as a string, tolerating a
/// trailing percent sign.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .trim_end_matches('%')
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
