//! World Bank API client.
//!
//! Fetches the curated indicator series per region and shapes the two
//! most recent non-null data points into observations (latest as actual,
//! the one before as previous; the World Bank publishes no forecasts).
//!
//! Indicators degrade independently: one failing series is logged and
//! skipped, the rest of the batch still comes back. Requests run
//! strictly sequentially under a shared rate limiter.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::Client;
use serde::Deserialize;

use fx_bias_core::{
    IndicatorSource, IndicatorSpec, Observation, Region, WorldBankConfig, WORLD_BANK_INDICATORS,
};

use crate::error::{Result, WorldBankError};

/// World Bank API base URL.
pub const WORLD_BANK_API_URL: &str = "https://api.worldbank.org";

/// One data point of a series as returned by the API. Most fields of the
/// payload are irrelevant here; `value` is null for years without data.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDataPoint {
    pub date: Option<String>,
    pub value: Option<f64>,
}

/// World Bank API client.
pub struct WorldBankClient {
    /// HTTP client
    http: Client,
    /// Base URL for API
    base_url: String,
    /// Data points requested per series
    per_page: u32,
    /// Rate limiter (requests per minute)
    rate_limiter: Arc<
        RateLimiter<
            governor::state::NotKeyed,
            governor::state::InMemoryState,
            governor::clock::DefaultClock,
        >,
    >,
}

impl WorldBankClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &WorldBankConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WorldBankError::Configuration(format!("HTTP client: {e}")))?;

        let rpm = NonZeroU32::new(config.requests_per_minute).unwrap_or(nonzero!(30u32));
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(rpm)));

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            per_page: config.per_page,
            rate_limiter,
        })
    }

    /// Sets a custom base URL (useful for testing).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Waits for the rate limiter and makes a GET request.
    async fn get(&self, path: &str) -> Result<serde_json::Value> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(WorldBankError::api(status, text));
        }

        let body = response.json::<serde_json::Value>().await?;
        Ok(body)
    }

    /// Fetches one series for a region and shapes it into an observation.
    ///
    /// Returns `Ok(None)` when the series exists but has no usable data
    /// points at all; an observation with only an actual when a single
    /// point exists (the evaluator records the missing baseline).
    async fn fetch_series(
        &self,
        region: Region,
        spec: &IndicatorSpec,
        date: NaiveDate,
    ) -> Result<Option<Observation>> {
        let path = format!(
            "/v2/country/{}/indicator/{}?format=json&per_page={}",
            region.country_code(),
            spec.code,
            self.per_page
        );

        let body = self.get(&path).await?;

        // Payload shape: [page_info, [points...]]. Error responses and
        // unknown series come back as a single-element array.
        let Some(points) = body.get(1).filter(|v| !v.is_null()) else {
            tracing::debug!(
                indicator = spec.code,
                country = region.country_code(),
                "series returned no data array"
            );
            return Ok(None);
        };

        let points: Vec<RawDataPoint> = serde_json::from_value(points.clone())?;

        // Points arrive newest year first; nulls mark unpublished years.
        let mut values = points.iter().filter_map(|p| p.value);
        let Some(latest) = values.next() else {
            tracing::debug!(
                indicator = spec.code,
                country = region.country_code(),
                "series has no non-null values"
            );
            return Ok(None);
        };

        let mut obs = Observation::new(region, spec.name, date).with_actual(latest);
        if let Some(previous) = values.next() {
            obs = obs.with_previous(previous);
        }
        Ok(Some(obs))
    }
}

#[async_trait]
impl IndicatorSource for WorldBankClient {
    async fn fetch_observations(
        &self,
        region: Region,
        date: NaiveDate,
    ) -> AnyResult<Vec<Observation>> {
        let mut observations = Vec::new();

        for spec in WORLD_BANK_INDICATORS {
            match self.fetch_series(region, spec, date).await {
                Ok(Some(obs)) => observations.push(obs),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        indicator = spec.code,
                        country = region.country_code(),
                        transient = e.is_transient(),
                        error = %e,
                        "failed to fetch series"
                    );
                }
            }
        }

        Ok(observations)
    }

    fn name(&self) -> &str {
        "worldbank"
    }
}
