//! Converts amounts with a known rate and renders the results as text.

use crate::core::currency::CurrencyCode;
use crate::core::error::InputError;
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Display;
use std::str::FromStr;

const MAX_SCALE: u32 = 28;

/// Multiplies `amount` by `rate` without any intermediate rounding.
///
/// Returns `None` when the exact product does not fit a `Decimal`, either
/// because it overflows or because it needs more than 28 decimal places.
pub fn convert(amount: Decimal, rate: Decimal) -> Option<Decimal> {
    let amount = amount.normalize();
    let rate = rate.normalize();
    let scale = amount.scale() + rate.scale();
    if scale > MAX_SCALE {
        return None;
    }
    // `checked_mul` drops fractional digits instead of overflowing when it can.
    amount
        .checked_mul(rate)
        .filter(|product| product.scale() == scale)
}

/// Formats a value as `#,##0.00`: two decimals, half-even rounding and comma
/// separated thousands.
pub fn format_money(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    format!("{sign}{grouped}.{frac_part}")
}

/// Formats a value with trailing zeros removed but at least one decimal place,
/// e.g. `100.0` or `12.75`.
pub fn format_plain(value: Decimal) -> String {
    let normalized = value.normalize();
    if normalized.scale() == 0 {
        format!("{normalized}.0")
    } else {
        normalized.to_string()
    }
}

/// Parses a strictly positive decimal amount.
pub fn parse_amount(text: &str) -> Result<Decimal, InputError> {
    let trimmed = text.trim();
    match Decimal::from_str(trimmed) {
        Ok(amount) if amount > Decimal::ZERO => Ok(amount),
        _ => Err(InputError::InvalidAmount(trimmed.to_string())),
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(text: &str) -> Result<NaiveDate, InputError> {
    let trimmed = text.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| InputError::InvalidDate(trimmed.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Converted at the live rate on `date`.
    Immediate,
    /// Converted at the rate published for `date`.
    Historical,
}

/// One completed conversion, as written to the history log.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRecord {
    pub date: NaiveDate,
    pub kind: RecordKind,
    pub amount: Decimal,
    pub base: CurrencyCode,
    pub target: CurrencyCode,
    pub converted_amount: Decimal,
}

impl ConversionRecord {
    pub fn new(
        kind: RecordKind,
        date: NaiveDate,
        amount: Decimal,
        base: CurrencyCode,
        target: CurrencyCode,
        rate: Decimal,
    ) -> Result<Self, InputError> {
        let converted_amount = convert(amount, rate)
            .ok_or_else(|| InputError::AmountTooLarge(format_plain(amount)))?;
        Ok(Self {
            date,
            kind,
            amount,
            base,
            target,
            converted_amount,
        })
    }

    pub fn immediate(
        date: NaiveDate,
        amount: Decimal,
        base: CurrencyCode,
        target: CurrencyCode,
        rate: Decimal,
    ) -> Result<Self, InputError> {
        Self::new(RecordKind::Immediate, date, amount, base, target, rate)
    }

    pub fn historical(
        date: NaiveDate,
        amount: Decimal,
        base: CurrencyCode,
        target: CurrencyCode,
        rate: Decimal,
    ) -> Result<Self, InputError> {
        Self::new(RecordKind::Historical, date, amount, base, target, rate)
    }
}

impl Display for ConversionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let date = self.date.format("%Y-%m-%d");
        let amount = format_plain(self.amount);
        let converted = format_money(self.converted_amount);
        match self.kind {
            RecordKind::Immediate => write!(
                f,
                "{date} | {amount} {} = {converted} {}",
                self.base, self.target
            ),
            RecordKind::Historical => write!(
                f,
                "HIST {date} | {amount} {} -> {converted} {}",
                self.base, self.target
            ),
        }
    }
}
