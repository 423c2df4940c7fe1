use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{debug, instrument};

use super::extract::extract_rate;
use crate::core::currency::{CurrencyCode, RateProvider};
use crate::core::error::RateUnavailable;

/// Rate provider backed by the Frankfurter API (`/latest` and `/<date>`).
pub struct FrankfurterProvider {
    base_url: String,
    client: reqwest::Client,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fxc/1.0")
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(FrankfurterProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn live_rate_url(&self, base: &CurrencyCode, target: &CurrencyCode) -> String {
        format!("{}/latest?from={base}&to={target}", self.base_url)
    }

    pub fn historical_rate_url(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
        date: NaiveDate,
    ) -> String {
        format!(
            "{}/{}?from={base}&to={target}",
            self.base_url,
            date.format("%Y-%m-%d")
        )
    }

    async fn fetch_rate(&self, url: &str, target: &CurrencyCode) -> Result<Decimal> {
        debug!("Requesting exchange rate from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for URL: {}", response.status(), url));
        }

        let text = response
            .text()
            .await
            .context("Failed to get response text")?;

        let rate = extract_rate(&text, target.as_str())
            .ok_or_else(|| anyhow!("No rate for {} in response from {}", target, url))?;

        if rate <= Decimal::ZERO {
            return Err(anyhow!("Non-positive rate {} for {} from {}", rate, target, url));
        }
        Ok(rate)
    }

    /// Runs a lookup and folds every failure cause into [`RateUnavailable`].
    async fn lookup(
        &self,
        url: String,
        base: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Result<Decimal, RateUnavailable> {
        if base == target {
            debug!("No currency conversion needed ({base} -> {target})");
            return Ok(Decimal::ONE);
        }

        match self.fetch_rate(&url, target).await {
            Ok(rate) => {
                debug!("Rate {base} -> {target}: {rate}");
                Ok(rate)
            }
            Err(e) => {
                debug!(error = %e, "Exchange rate lookup failed");
                Err(RateUnavailable)
            }
        }
    }
}

#[async_trait]
impl RateProvider for FrankfurterProvider {
    #[instrument(name = "LiveRateFetch", skip(self), fields(base = %base, target = %target))]
    async fn live_rate(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Result<Decimal, RateUnavailable> {
        let url = self.live_rate_url(base, target);
        self.lookup(url, base, target).await
    }

    #[instrument(
        name = "HistoricalRateFetch",
        skip(self),
        fields(base = %base, target = %target, date = %date)
    )]
    async fn historical_rate(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
        date: NaiveDate,
    ) -> Result<Decimal, RateUnavailable> {
        let url = self.historical_rate_url(base, target, date);
        self.lookup(url, base, target).await
    }
}
