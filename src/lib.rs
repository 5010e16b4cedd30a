pub mod cli;
pub mod core;
pub mod providers;
pub mod server;
pub mod store;

use crate::core::amortization::LoanParameters;
use crate::core::config::AppConfig;
use crate::core::growth::InvestmentParameters;
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info};

pub enum AppCommand {
    Emi {
        loan: LoanParameters,
        prepayments: Vec<f64>,
    },
    Sip(InvestmentParameters),
    Snapshot {
        symbols: Vec<String>,
        watch: bool,
    },
    Serve {
        port: Option<u16>,
    },
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    // A .env file may carry the API key during development.
    dotenvy::dotenv().ok();

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    match command {
        AppCommand::Emi { loan, prepayments } => cli::emi::run(&loan, &prepayments),
        AppCommand::Sip(params) => cli::sip::run(&params),
        AppCommand::Snapshot { symbols, watch } => {
            let config = load_config(config_path)?;
            let service = providers::quote_service(&config)?;
            let refresh: Option<Duration> = watch.then(|| config.refresh_interval());
            cli::snapshot::run(&service, &symbols, refresh).await
        }
        AppCommand::Serve { port } => {
            info!("Market data proxy starting...");
            let config = load_config(config_path)?;
            let server = server::Server::from_config(&config, port)?;
            println!("Serving market data on {}", server.addr());
            server.start().await
        }
    }
}
