use anyhow::Result;
use clap::{Parser, Subcommand};
use fxc::core::log::init_logging;

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

impl From<Commands> for fxc::AppCommand {
    fn from(cmd: Commands) -> fxc::AppCommand {
        match cmd {
            Commands::Currencies => fxc::AppCommand::Currencies,
            Commands::Rate { from, to, date } => fxc::AppCommand::Rate { from, to, date },
            Commands::Convert {
                from,
                to,
                amount,
                date,
            } => fxc::AppCommand::Convert {
                from,
                to,
                amount,
                date,
            },
            Commands::Week { from, to } => fxc::AppCommand::Week { from, to },
            Commands::Interactive => fxc::AppCommand::Interactive,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List the supported currencies
    Currencies,
    /// Show the live rate, or the rate on a given date
    Rate {
        /// Base currency code, e.g. USD
        from: String,
        /// Target currency code, e.g. INR
        to: String,
        /// Date in YYYY-MM-DD format
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Convert an amount and append it to the history log
    Convert {
        /// Base currency code, e.g. USD
        from: String,
        /// Target currency code, e.g. INR
        to: String,
        /// Amount in the base currency, greater than 0
        amount: String,
        /// Convert at the rate of this date (YYYY-MM-DD) instead of the live rate
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show rates for the last 7 days
    Week {
        /// Base currency code, e.g. USD
        from: String,
        /// Target currency code, e.g. INR
        to: String,
    },
    /// Start the interactive menu (default)
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxc::cli::setup::setup(),
        Some(cmd) => fxc::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            fxc::run_command(fxc::AppCommand::Interactive, cli.config_path.as_deref()).await
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
