//! Menu-driven session: pick a currency pair, then convert, look up past
//! rates or show the last week until the user changes the pair or exits.

use super::{convert, currencies, rate, week};
use crate::core::conversion::{parse_amount, parse_date};
use crate::core::report;
use crate::core::{ConversionRecord, CurrencyCatalog, CurrencyCode, InputError, RateProvider};
use crate::store::HistoryLog;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use tracing::debug;

const MENU: &str = "\nMENU:
1. Convert amount
2. Historical rate for specific date
3. Show last 7 days
4. Change currencies
5. Exit";

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

enum MenuOutcome {
    ChangePair,
    Exit,
}

pub struct Session<'a> {
    catalog: &'a CurrencyCatalog,
    provider: &'a dyn RateProvider,
    history: &'a HistoryLog,
    report_concurrency: usize,
    today: fn() -> NaiveDate,
}

impl<'a> Session<'a> {
    pub fn new(
        catalog: &'a CurrencyCatalog,
        provider: &'a dyn RateProvider,
        history: &'a HistoryLog,
        report_concurrency: usize,
    ) -> Self {
        Session {
            catalog,
            provider,
            history,
            report_concurrency,
            today: local_today,
        }
    }

    /// Overrides the source of "today", used to stamp live conversions and
    /// anchor the weekly report.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Runs until the user picks "Exit" or the input ends.
    pub async fn run<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> Result<()> {
        writeln!(out, "===============================================")?;
        writeln!(out, "           CURRENCY CONVERTER (LIVE + HIST)    ")?;
        writeln!(out, "===============================================")?;

        loop {
            writeln!(out, "\n{}", currencies::render(self.catalog))?;

            let Some(base) = self.read_code(input, out, "\nEnter BASE currency: ")? else {
                return Ok(());
            };
            let Some(target) = self.read_code(input, out, "Enter TARGET currency: ")? else {
                return Ok(());
            };

            writeln!(out, "\nFetching live exchange rate...")?;
            let live_rate = match self.provider.live_rate(&base, &target).await {
                Ok(rate) => rate,
                Err(e) => {
                    debug!(error = %e, "Live rate lookup failed");
                    writeln!(out, "API Error: Try different currency.")?;
                    continue;
                }
            };
            writeln!(out, "{}", rate::describe(&base, &target, live_rate, None))?;

            match self.menu(input, out, &base, &target, live_rate).await? {
                MenuOutcome::ChangePair => writeln!(out)?,
                MenuOutcome::Exit => return Ok(()),
            }
        }
    }

    async fn menu<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
        base: &CurrencyCode,
        target: &CurrencyCode,
        live_rate: Decimal,
    ) -> Result<MenuOutcome> {
        loop {
            writeln!(out, "{MENU}")?;
            let Some(choice) = prompt(input, out, "Choice: ")? else {
                return Ok(MenuOutcome::Exit);
            };

            match choice.trim() {
                "1" => {
                    let today = (self.today)();
                    let Some(record) =
                        read_record(input, out, "\nEnter amount to convert: ", |amount| {
                            ConversionRecord::immediate(
                                today,
                                amount,
                                base.clone(),
                                target.clone(),
                                live_rate,
                            )
                        })?
                    else {
                        return Ok(MenuOutcome::Exit);
                    };
                    writeln!(out, "\n{}", convert::describe(&record))?;
                    self.history.append(&record);
                }
                "2" => {
                    if !self.historical(input, out, base, target).await? {
                        return Ok(MenuOutcome::Exit);
                    }
                }
                "3" => {
                    let entries = report::run(
                        self.provider,
                        base,
                        target,
                        (self.today)(),
                        self.report_concurrency,
                        &|| (),
                    )
                    .await;
                    writeln!(out, "\n{}", week::render(&entries, base, target))?;
                }
                "4" => return Ok(MenuOutcome::ChangePair),
                "5" => {
                    writeln!(out, "Goodbye!")?;
                    return Ok(MenuOutcome::Exit);
                }
                _ => writeln!(out, "Invalid choice.")?,
            }
        }
    }

    /// Repeats date lookups until the user enters `b`. Returns `false` when
    /// the input ended.
    async fn historical<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
        base: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Result<bool> {
        loop {
            let Some(line) = prompt(input, out, "\nEnter date (YYYY-MM-DD) or 'b' to go back: ")?
            else {
                return Ok(false);
            };
            if line.trim().eq_ignore_ascii_case("b") {
                return Ok(true);
            }

            let date = match parse_date(&line) {
                Ok(date) => date,
                Err(_) => {
                    writeln!(out, "Invalid date.")?;
                    continue;
                }
            };

            let rate = match self.provider.historical_rate(base, target, date).await {
                Ok(rate) => rate,
                Err(_) => {
                    writeln!(out, "No historical data for this date.")?;
                    continue;
                }
            };
            writeln!(out, "{}", rate::describe(base, target, rate, Some(date)))?;

            let Some(record) = read_record(input, out, "Enter amount to convert: ", |amount| {
                ConversionRecord::historical(date, amount, base.clone(), target.clone(), rate)
            })?
            else {
                return Ok(false);
            };
            writeln!(out, "{}", convert::describe(&record))?;
            self.history.append(&record);
        }
    }

    fn read_code<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
        message: &str,
    ) -> Result<Option<CurrencyCode>> {
        loop {
            let Some(line) = prompt(input, out, message)? else {
                return Ok(None);
            };
            match self.catalog.validate(&line) {
                Ok(code) => return Ok(Some(code)),
                Err(_) => writeln!(out, "Invalid code. Example: USD, INR, EUR")?,
            }
        }
    }
}

fn read_amount<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> Result<Option<Decimal>> {
    loop {
        let Some(line) = prompt(input, out, message)? else {
            return Ok(None);
        };
        match parse_amount(&line) {
            Ok(amount) => return Ok(Some(amount)),
            Err(_) => writeln!(out, "Enter a valid number greater than 0.")?,
        }
    }
}

/// Reads amounts until `build` accepts one. An amount whose conversion does
/// not fit is reported and asked for again.
fn read_record<R, W, F>(
    input: &mut R,
    out: &mut W,
    message: &str,
    build: F,
) -> Result<Option<ConversionRecord>>
where
    R: BufRead,
    W: Write,
    F: Fn(Decimal) -> Result<ConversionRecord, InputError>,
{
    loop {
        let Some(amount) = read_amount(input, out, message)? else {
            return Ok(None);
        };
        match build(amount) {
            Ok(record) => return Ok(Some(record)),
            Err(e) => {
                debug!(error = %e, "Conversion rejected");
                writeln!(out, "Enter a valid number. {e}")?;
            }
        }
    }
}

/// Writes `message` and reads one line. `None` means the input is exhausted.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> Result<Option<String>> {
    write!(out, "{message}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
