use super::{rate, ui};
use crate::core::conversion::format_money;
use crate::core::{ConversionRecord, CurrencyCode, RateProvider};
use crate::store::HistoryLog;
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

/// Looks up the rate (live, or for `date`) and builds the conversion record.
/// Live conversions are stamped with `today`.
pub async fn build_record(
    provider: &dyn RateProvider,
    base: &CurrencyCode,
    target: &CurrencyCode,
    amount: Decimal,
    date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<ConversionRecord> {
    let rate = rate::fetch(provider, base, target, date).await?;
    let record = match date {
        Some(date) => {
            ConversionRecord::historical(date, amount, base.clone(), target.clone(), rate)?
        }
        None => ConversionRecord::immediate(today, amount, base.clone(), target.clone(), rate)?,
    };
    debug!(?record, "Converted");
    Ok(record)
}

pub fn describe(record: &ConversionRecord) -> String {
    format!(
        "RESULT: {} {} = {} {}",
        format_money(record.amount),
        record.base,
        format_money(record.converted_amount),
        record.target
    )
}

pub async fn run(
    provider: &dyn RateProvider,
    history: &HistoryLog,
    base: &CurrencyCode,
    target: &CurrencyCode,
    amount: Decimal,
    date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<ConversionRecord> {
    let record = build_record(provider, base, target, amount, date, today).await?;
    println!("{}", ui::style_text(&describe(&record), ui::StyleType::Result));
    history.append(&record);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CurrencyCatalog, RateUnavailable};
    use async_trait::async_trait;
    use std::str::FromStr;

    struct FixedRateProvider {
        live: Option<Decimal>,
        historical: Option<Decimal>,
    }

    #[async_trait]
    impl RateProvider for FixedRateProvider {
        async fn live_rate(
            &self,
            _base: &CurrencyCode,
            _target: &CurrencyCode,
        ) -> Result<Decimal, RateUnavailable> {
            self.live.ok_or(RateUnavailable)
        }

        async fn historical_rate(
            &self,
            _base: &CurrencyCode,
            _target: &CurrencyCode,
            _date: NaiveDate,
        ) -> Result<Decimal, RateUnavailable> {
            self.historical.ok_or(RateUnavailable)
        }
    }

    fn d(text: &str) -> Decimal {
        Decimal::from_str(text).unwrap()
    }

    #[tokio::test]
    async fn test_live_conversion_record() {
        let catalog = CurrencyCatalog::default();
        let usd = catalog.validate("USD").unwrap();
        let inr = catalog.validate("INR").unwrap();
        let provider = FixedRateProvider {
            live: Some(d("83.00")),
            historical: None,
        };
        let today = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();

        let record = build_record(&provider, &usd, &inr, d("100.00"), None, today)
            .await
            .unwrap();

        assert_eq!(record.converted_amount, d("8300"));
        assert_eq!(describe(&record), "RESULT: 100.00 USD = 8,300.00 INR");
        assert_eq!(record.to_string(), "2026-03-09 | 100.0 USD = 8,300.00 INR");
    }

    #[tokio::test]
    async fn test_historical_conversion_record() {
        let catalog = CurrencyCatalog::default();
        let usd = catalog.validate("USD").unwrap();
        let inr = catalog.validate("INR").unwrap();
        let provider = FixedRateProvider {
            live: None,
            historical: Some(d("82.50")),
        };
        let today = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 15);

        let record = build_record(&provider, &usd, &inr, d("50"), date, today)
            .await
            .unwrap();

        assert_eq!(record.to_string(), "HIST 2024-01-15 | 50.0 USD -> 4,125.00 INR");
    }

    #[tokio::test]
    async fn test_unavailable_rate_produces_no_record() {
        let catalog = CurrencyCatalog::default();
        let usd = catalog.validate("USD").unwrap();
        let inr = catalog.validate("INR").unwrap();
        let provider = FixedRateProvider {
            live: None,
            historical: None,
        };
        let today = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();

        let result = build_record(&provider, &usd, &inr, d("10"), None, today).await;
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Exchange rate unavailable")
        );
    }

    #[tokio::test]
    async fn test_oversized_amount_produces_no_record() {
        let catalog = CurrencyCatalog::default();
        let usd = catalog.validate("USD").unwrap();
        let inr = catalog.validate("INR").unwrap();
        let provider = FixedRateProvider {
            live: Some(d("83.12")),
            historical: None,
        };
        let today = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let amount = d("79228162514264337593543950335");

        let result = build_record(&provider, &usd, &inr, amount, None, today).await;
        assert!(result.unwrap_err().to_string().contains("Amount too large"));
    }
}
