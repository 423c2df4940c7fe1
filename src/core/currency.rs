//! Currency codes, the catalog that validates them, and the rate provider abstraction.

use crate::core::error::{InputError, RateUnavailable};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::warn;

/// A validated, uppercase ISO-style currency code.
///
/// Only [`CurrencyCatalog::validate`] hands these out, so holding one means the
/// code is known to the catalog it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub code: String,
    pub name: String,
}

/// Read-only lookup of known currencies, in display order.
#[derive(Debug, Clone)]
pub struct CurrencyCatalog {
    entries: Vec<CurrencyInfo>,
}

const DEFAULT_CURRENCIES: [(&str, &str); 12] = [
    ("USD", "United States Dollar"),
    ("EUR", "Euro"),
    ("INR", "Indian Rupee"),
    ("GBP", "British Pound"),
    ("JPY", "Japanese Yen"),
    ("AUD", "Australian Dollar"),
    ("CAD", "Canadian Dollar"),
    ("CHF", "Swiss Franc"),
    ("SGD", "Singapore Dollar"),
    ("CNY", "Chinese Yuan"),
    ("HKD", "Hong Kong Dollar"),
    ("NZD", "New Zealand Dollar"),
];

impl Default for CurrencyCatalog {
    fn default() -> Self {
        Self::new(
            DEFAULT_CURRENCIES
                .iter()
                .map(|(code, name)| CurrencyInfo {
                    code: code.to_string(),
                    name: name.to_string(),
                })
                .collect(),
        )
    }
}

impl CurrencyCatalog {
    /// Builds a catalog from the given entries. Codes are normalized to
    /// uppercase. Entries that are not 3-letter codes and later duplicates are
    /// ignored.
    pub fn new(entries: Vec<CurrencyInfo>) -> Self {
        let mut normalized: Vec<CurrencyInfo> = Vec::with_capacity(entries.len());
        for entry in entries {
            let code = entry.code.trim().to_uppercase();
            if !is_well_formed(&code) {
                warn!(code = %entry.code, "Ignoring invalid currency code");
                continue;
            }
            if normalized.iter().any(|e| e.code == code) {
                continue;
            }
            normalized.push(CurrencyInfo {
                code,
                name: entry.name,
            });
        }
        Self {
            entries: normalized,
        }
    }

    pub fn entries(&self) -> &[CurrencyInfo] {
        &self.entries
    }

    pub fn name_of(&self, code: &CurrencyCode) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.code == code.0)
            .map(|e| e.name.as_str())
    }

    /// Turns raw user input into a [`CurrencyCode`] if it is a 3-letter code
    /// present in this catalog.
    pub fn validate(&self, raw: &str) -> Result<CurrencyCode, InputError> {
        let code = raw.trim().to_uppercase();
        if is_well_formed(&code) && self.entries.iter().any(|e| e.code == code) {
            Ok(CurrencyCode(code))
        } else {
            Err(InputError::InvalidCurrency(raw.trim().to_string()))
        }
    }
}

fn is_well_formed(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
}

/// Source of exchange rates. A rate is the number of `target` units worth one
/// `base` unit and is always strictly positive.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn live_rate(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Result<Decimal, RateUnavailable>;

    async fn historical_rate(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
        date: NaiveDate,
    ) -> Result<Decimal, RateUnavailable>;
}
