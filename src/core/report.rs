//! Rates for the last seven calendar days.

use crate::core::currency::{CurrencyCode, RateProvider};
use chrono::{Duration, NaiveDate};
use futures::stream::{self, StreamExt};
use rust_decimal::Decimal;
use tracing::debug;

pub const REPORT_DAYS: i64 = 7;

/// The rate published for one day, or `None` when it could not be obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRateEntry {
    pub date: NaiveDate,
    pub rate: Option<Decimal>,
}

/// Fetches the rate for `today` and each of the six days before it, most
/// recent first.
///
/// A failed day is recorded with no rate and never stops the remaining days.
/// With `concurrency` of 1 the requests run strictly one after another; larger
/// values overlap up to that many requests while keeping the output order.
pub async fn run(
    provider: &dyn RateProvider,
    base: &CurrencyCode,
    target: &CurrencyCode,
    today: NaiveDate,
    concurrency: usize,
    update_callback: &(dyn Fn() + Sync),
) -> Vec<DailyRateEntry> {
    let dates: Vec<NaiveDate> = (0..REPORT_DAYS)
        .map(|offset| today - Duration::days(offset))
        .collect();

    let entries: Vec<DailyRateEntry> = stream::iter(dates)
        .map(|date| async move {
            let rate = provider.historical_rate(base, target, date).await.ok();
            if rate.is_none() {
                debug!(%date, %base, %target, "No rate for day");
            }
            update_callback();
            DailyRateEntry { date, rate }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::CurrencyCatalog;
    use crate::core::error::RateUnavailable;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::str::FromStr;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockRateProvider {
        rate: Decimal,
        failing_dates: HashSet<NaiveDate>,
        requested: Mutex<Vec<NaiveDate>>,
    }

    impl MockRateProvider {
        fn new(rate: &str) -> Self {
            MockRateProvider {
                rate: Decimal::from_str(rate).unwrap(),
                failing_dates: HashSet::new(),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn fail_on(mut self, date: NaiveDate) -> Self {
            self.failing_dates.insert(date);
            self
        }
    }

    #[async_trait]
    impl RateProvider for MockRateProvider {
        async fn live_rate(
            &self,
            _base: &CurrencyCode,
            _target: &CurrencyCode,
        ) -> Result<Decimal, RateUnavailable> {
            Ok(self.rate)
        }

        async fn historical_rate(
            &self,
            _base: &CurrencyCode,
            _target: &CurrencyCode,
            date: NaiveDate,
        ) -> Result<Decimal, RateUnavailable> {
            self.requested.lock().unwrap().push(date);
            if self.failing_dates.contains(&date) {
                Err(RateUnavailable)
            } else {
                Ok(self.rate)
            }
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pair() -> (CurrencyCode, CurrencyCode) {
        let catalog = CurrencyCatalog::default();
        (
            catalog.validate("USD").unwrap(),
            catalog.validate("INR").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_report_has_seven_descending_days() {
        let (usd, inr) = pair();
        let provider = MockRateProvider::new("83.10");
        let today = ymd(2024, 3, 3);

        let entries = run(&provider, &usd, &inr, today, 1, &|| ()).await;

        let dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![
                ymd(2024, 3, 3),
                ymd(2024, 3, 2),
                ymd(2024, 3, 1),
                ymd(2024, 2, 29),
                ymd(2024, 2, 28),
                ymd(2024, 2, 27),
                ymd(2024, 2, 26),
            ]
        );
        assert!(entries.iter().all(|e| e.rate.is_some()));
    }

    #[tokio::test]
    async fn test_failed_day_does_not_stop_the_rest() {
        let (usd, inr) = pair();
        let today = ymd(2024, 1, 15);
        let provider = MockRateProvider::new("82.50").fail_on(ymd(2024, 1, 13));
        let calls = AtomicUsize::new(0);

        let entries = run(&provider, &usd, &inr, today, 1, &|| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
        .await;

        assert_eq!(entries.len(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 7);
        assert_eq!(entries[2].date, ymd(2024, 1, 13));
        assert!(entries[2].rate.is_none());
        for (i, entry) in entries.iter().enumerate() {
            if i != 2 {
                assert_eq!(entry.rate, Some(Decimal::from_str("82.50").unwrap()));
            }
        }

        // Requests are issued in report order, one per day.
        let requested = provider.requested.lock().unwrap().clone();
        let expected: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
        assert_eq!(requested, expected);
    }

    #[tokio::test]
    async fn test_all_days_failing_still_yields_seven_entries() {
        let (usd, inr) = pair();
        let today = ymd(2024, 1, 15);
        let mut provider = MockRateProvider::new("1");
        for offset in 0..REPORT_DAYS {
            provider = provider.fail_on(today - Duration::days(offset));
        }

        let entries = run(&provider, &usd, &inr, today, 1, &|| ()).await;

        assert_eq!(entries.len(), 7);
        assert!(entries.iter().all(|e| e.rate.is_none()));
    }

    #[tokio::test]
    async fn test_concurrent_report_keeps_order() {
        let (usd, inr) = pair();
        let today = ymd(2024, 1, 15);
        let provider = MockRateProvider::new("0.91").fail_on(ymd(2024, 1, 10));

        let entries = run(&provider, &usd, &inr, today, 4, &|| ()).await;

        assert_eq!(entries.len(), 7);
        for pair in entries.windows(2) {
            assert!(pair[0].date > pair[1].date);
        }
        assert!(entries[5].rate.is_none());
        assert_eq!(provider.requested.lock().unwrap().len(), 7);
    }
}
