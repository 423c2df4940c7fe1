use super::ui;
use crate::core::{CurrencyCode, RateProvider};
use anyhow::{Result, bail};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Describes a rate the way both the CLI and the interactive session print it.
pub fn describe(
    base: &CurrencyCode,
    target: &CurrencyCode,
    rate: Decimal,
    date: Option<NaiveDate>,
) -> String {
    let rate = ui::format_rate(rate);
    match date {
        Some(date) => format!("On {} → 1 {base} = {rate} {target}", date.format("%Y-%m-%d")),
        None => format!("Live Rate: 1 {base} = {rate} {target}"),
    }
}

/// Fetches the live rate, or the rate for `date` when given.
pub async fn fetch(
    provider: &dyn RateProvider,
    base: &CurrencyCode,
    target: &CurrencyCode,
    date: Option<NaiveDate>,
) -> Result<Decimal> {
    let rate = match date {
        Some(date) => provider.historical_rate(base, target, date).await,
        None => provider.live_rate(base, target).await,
    };

    match (rate, date) {
        (Ok(rate), _) => Ok(rate),
        (Err(e), Some(date)) => bail!("{e}: no historical data for {base} -> {target} on {date}"),
        (Err(e), None) => bail!("{e}: try a different currency pair"),
    }
}

pub async fn run(
    provider: &dyn RateProvider,
    base: &CurrencyCode,
    target: &CurrencyCode,
    date: Option<NaiveDate>,
) -> Result<()> {
    let rate = fetch(provider, base, target, date).await?;
    println!("{}", describe(base, target, rate, date));
    Ok(())
}
