use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use finsnap::cli::snapshot::SnapshotGroup;
use finsnap::core::amortization::{DEFAULT_PREPAYMENTS, LoanParameters, LoanPreset};
use finsnap::core::growth::InvestmentParameters;
use finsnap::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    Home,
    Car,
}

impl From<PresetArg> for LoanPreset {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Home => LoanPreset::Home,
            PresetArg::Car => LoanPreset::Car,
        }
    }
}

#[derive(Args)]
struct EmiArgs {
    /// Start from a typical loan; explicit values override it
    #[arg(long, value_enum, default_value = "home")]
    preset: PresetArg,

    /// Loan amount
    #[arg(short, long)]
    principal: Option<f64>,

    /// Annual interest rate in percent
    #[arg(short, long)]
    rate: Option<f64>,

    /// Tenure in years
    #[arg(short, long)]
    years: Option<u32>,

    /// Lump-sum prepayments to compare
    #[arg(long, value_delimiter = ',')]
    prepay: Option<Vec<f64>>,
}

impl EmiArgs {
    fn loan(&self) -> LoanParameters {
        let base = LoanPreset::from(self.preset).parameters();
        LoanParameters::new(
            self.principal.unwrap_or(base.principal),
            self.rate.unwrap_or(base.annual_rate_percent),
            self.years.unwrap_or(base.term_years),
        )
    }
}

#[derive(Args)]
struct SipArgs {
    /// Monthly contribution
    #[arg(short, long, default_value_t = 5000.0)]
    monthly: f64,

    /// Expected annual return in percent
    #[arg(short, long, default_value_t = 12.0)]
    rate: f64,

    /// Investment horizon in years
    #[arg(short, long, default_value_t = 35)]
    years: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Loan EMI with yearly amortization schedule
    Emi(EmiArgs),
    /// Future value of a monthly investment
    Sip(SipArgs),
    /// Market snapshot with live quotes where available
    Snapshot {
        /// Symbol group to display
        #[arg(short, long, value_enum, default_value = "global")]
        group: SnapshotGroup,

        /// Explicit symbols, overriding the group
        #[arg(short, long, value_delimiter = ',')]
        symbols: Option<Vec<String>>,

        /// Keep refreshing at the configured interval
        #[arg(short, long)]
        watch: bool,
    },
    /// Run the market data proxy
    Serve {
        /// Port to listen on, overriding the config
        #[arg(short, long)]
        port: Option<u16>,
    },
}

impl From<Commands> for finsnap::AppCommand {
    fn from(cmd: Commands) -> finsnap::AppCommand {
        match cmd {
            Commands::Emi(args) => finsnap::AppCommand::Emi {
                loan: args.loan(),
                prepayments: args
                    .prepay
                    .unwrap_or_else(|| DEFAULT_PREPAYMENTS.to_vec()),
            },
            Commands::Sip(args) => finsnap::AppCommand::Sip(InvestmentParameters::new(
                args.monthly,
                args.rate,
                args.years,
            )),
            Commands::Snapshot {
                group,
                symbols,
                watch,
            } => finsnap::AppCommand::Snapshot {
                symbols: symbols
                    .map(|s| s.into_iter().map(|code| code.to_uppercase()).collect())
                    .unwrap_or_else(|| group.symbols()),
                watch,
            },
            Commands::Serve { port } => finsnap::AppCommand::Serve { port },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => finsnap::cli::setup::setup_at_path(path),
            None => finsnap::cli::setup::setup(),
        },
        Some(cmd) => finsnap::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
