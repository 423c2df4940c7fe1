pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::conversion::{parse_amount, parse_date};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::time::Duration;
use tracing::{debug, info};

pub enum AppCommand {
    Currencies,
    Rate {
        from: String,
        to: String,
        date: Option<String>,
    },
    Convert {
        from: String,
        to: String,
        amount: String,
        date: Option<String>,
    },
    Week {
        from: String,
        to: String,
    },
    Interactive,
}

fn parse_optional_date(date: Option<&str>) -> Result<Option<NaiveDate>> {
    Ok(date.map(parse_date).transpose()?)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let catalog = config.catalog();
    let provider = providers::frankfurter::FrankfurterProvider::new(
        config.frankfurter_url(),
        Duration::from_secs(config.timeout_secs),
    )?;
    let history = store::HistoryLog::new(config.history_path()?);
    let today = Local::now().date_naive();

    match command {
        AppCommand::Currencies => {
            cli::currencies::run(&catalog);
            Ok(())
        }
        AppCommand::Rate { from, to, date } => {
            let base = catalog.validate(&from)?;
            let target = catalog.validate(&to)?;
            let date = parse_optional_date(date.as_deref())?;
            cli::rate::run(&provider, &base, &target, date).await
        }
        AppCommand::Convert {
            from,
            to,
            amount,
            date,
        } => {
            let base = catalog.validate(&from)?;
            let target = catalog.validate(&to)?;
            let amount = parse_amount(&amount)?;
            let date = parse_optional_date(date.as_deref())?;
            cli::convert::run(&provider, &history, &base, &target, amount, date, today).await?;
            Ok(())
        }
        AppCommand::Week { from, to } => {
            let base = catalog.validate(&from)?;
            let target = catalog.validate(&to)?;
            cli::week::run(&provider, &base, &target, today, config.report_concurrency).await;
            Ok(())
        }
        AppCommand::Interactive => {
            let session = cli::interactive::Session::new(
                &catalog,
                &provider,
                &history,
                config.report_concurrency,
            );
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut out = std::io::stdout();
            session.run(&mut input, &mut out).await
        }
    }
}
