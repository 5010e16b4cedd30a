use std::sync::Arc;
use std::time::Duration;

use finsnap::core::amortization::{DEFAULT_PREPAYMENTS, LoanPreset};
use finsnap::core::growth::InvestmentParameters;
use finsnap::core::snapshot::{QuoteSource, build_snapshot};
use finsnap::core::{MarketQuoteService, QuoteProvider};
use finsnap::providers::alpha_vantage::AlphaVantageProvider;
use finsnap::providers::proxy::ProxyQuoteProvider;
use finsnap::providers::util::{DEFAULT_TIMEOUT, USER_AGENT, http_client};
use finsnap::providers::yahoo_finance::{BROWSER_USER_AGENT, YahooChartClient};
use finsnap::server::{AppState, Server};
use finsnap::store::MemoryCache;
use finsnap::{AppCommand, run_command};
use tokio::net::TcpListener;
use tracing::info;

mod test_utils {
    use serde_json::json;
    use wiremock::matchers::{method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Chart API stand-in answering for the S&P 500 ticker only.
    pub async fn create_chart_server(expected_calls: u64) -> MockServer {
        let mock_server = MockServer::start().await;
        let body = json!({
            "chart": {
                "result": [{
                    "meta": {
                        "regularMarketPrice": 5100.0,
                        "previousClose": 5000.0
                    }
                }]
            }
        });

        Mock::given(method("GET"))
            .and(path_regex(r"^/v8/finance/chart/(\^|%5E)GSPC$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(expected_calls)
            .mount(&mock_server)
            .await;

        mock_server
    }
}

/// Serves the proxy on an ephemeral port and returns its base URL.
async fn spawn_proxy(chart_url: &str) -> String {
    let client = http_client(BROWSER_USER_AGENT, DEFAULT_TIMEOUT).unwrap();
    let state = Arc::new(AppState {
        chart: YahooChartClient::new(chart_url, client),
        cache: Arc::new(MemoryCache::new()),
        cache_ttl: Duration::from_secs(300),
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = Server::new(addr, state);
    tokio::spawn(async move {
        server.serve(listener).await.unwrap();
    });

    format!("http://{addr}")
}

fn quote_service(proxy_url: &str) -> MarketQuoteService {
    let client = http_client(USER_AGENT, DEFAULT_TIMEOUT).unwrap();
    let providers: Vec<Arc<dyn QuoteProvider>> = vec![
        Arc::new(AlphaVantageProvider::new(
            "http://127.0.0.1:9",
            None,
            client.clone(),
        )),
        Arc::new(ProxyQuoteProvider::new(proxy_url, client)),
    ];
    MarketQuoteService::new(providers, Arc::new(MemoryCache::new()))
}

#[test_log::test(tokio::test)]
async fn test_snapshot_through_proxy() {
    // Service cache absorbs the second round, so upstream sees one call.
    let chart = test_utils::create_chart_server(1).await;
    let proxy_url = spawn_proxy(&chart.uri()).await;
    let service = quote_service(&proxy_url);

    let symbols = ["SPX", "UNKNOWN"];
    let quotes = service.get_quotes(&symbols).await;
    info!(?quotes, "Fetched quotes through proxy");

    assert_eq!(quotes.len(), 1);
    let spx = &quotes["SPX"];
    assert_eq!(spx.symbol, "SPX");
    assert_eq!(spx.price, 5100.0);
    assert_eq!(spx.change, 100.0);
    assert!((spx.change_percent - 2.0).abs() < 1e-9);

    let again = service.get_quotes(&symbols).await;
    assert_eq!(again["SPX"].timestamp, spx.timestamp);

    let rows = build_snapshot(&["SPX", "DJI", "UNKNOWN"], &quotes);
    assert_eq!(rows[0].source, QuoteSource::Live);
    assert_eq!(rows[0].value, 5100.0);
    assert_eq!(rows[1].source, QuoteSource::Static);
    assert_eq!(rows[2].source, QuoteSource::Unavailable);
}

#[test_log::test(tokio::test)]
async fn test_snapshot_command_falls_back_when_offline() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yaml");
    std::fs::write(
        &config_path,
        r#"
providers:
  alpha_vantage:
    base_url: "http://127.0.0.1:9"
  proxy:
    base_url: "http://127.0.0.1:9"
request_timeout_secs: 1
"#,
    )
    .unwrap();

    let command = AppCommand::Snapshot {
        symbols: vec!["NIFTY50".to_string(), "SENSEX".to_string()],
        watch: false,
    };
    let result = run_command(command, config_path.to_str()).await;
    assert!(result.is_ok(), "snapshot failed: {result:?}");
}

#[test_log::test(tokio::test)]
async fn test_calculator_commands() {
    let loan = AppCommand::Emi {
        loan: LoanPreset::Car.parameters(),
        prepayments: DEFAULT_PREPAYMENTS.to_vec(),
    };
    assert!(run_command(loan, None).await.is_ok());

    let sip = AppCommand::Sip(InvestmentParameters::new(5_000.0, 12.0, 35));
    assert!(run_command(sip, None).await.is_ok());

    let invalid = AppCommand::Sip(InvestmentParameters::new(5_000.0, -1.0, 35));
    let err = run_command(invalid, None).await.unwrap_err();
    assert!(err.to_string().starts_with("Invalid input"));
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_is_an_error() {
    let command = AppCommand::Snapshot {
        symbols: vec!["SPX".to_string()],
        watch: false,
    };
    let err = run_command(command, Some("/nonexistent/finsnap.yaml"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}
