use thiserror::Error;

/// Rejected user input. Raised before any request is built or record written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The currency code is malformed or not in the catalog.
    #[error("Invalid currency code: {0}. Example: USD, INR, EUR")]
    InvalidCurrency(String),

    /// The amount is not a number or is not greater than zero.
    #[error("Invalid amount: {0}. Enter a number greater than 0")]
    InvalidAmount(String),

    /// The converted value does not fit a `Decimal` without rounding.
    #[error("Amount too large: {0}. Enter a smaller amount")]
    AmountTooLarge(String),

    /// The date is not a `YYYY-MM-DD` calendar date.
    #[error("Invalid date: {0}. Expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// The single failure outcome of a rate lookup.
///
/// Transport errors, timeouts, non-2xx responses, missing data for a date and
/// payloads without the requested code all collapse into this value. The
/// underlying cause is only visible in debug logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Exchange rate unavailable")]
pub struct RateUnavailable;
