//! Economic calendar API client.
//!
//! One request per region and date against a commercial calendar feed,
//! authenticated with an `X-Api-Key` header. Transient failures degrade
//! to an empty batch (the session then falls back to stored history);
//! configuration and authentication problems propagate so they get
//! fixed instead of silently producing stale reports forever.

use std::time::Duration;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use fx_bias_core::{CalendarConfig, IndicatorSource, Observation, Region};

use crate::error::{CalendarError, Result};
use crate::records::{records_to_observations, RawCalendarEvent};

/// Economic calendar API client.
pub struct CalendarClient {
    /// HTTP client
    http: Client,
    /// Base URL for API
    base_url: String,
    /// API key, when the feed requires one
    api_key: Option<SecretString>,
}

impl CalendarClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    /// Returns a configuration error when no base URL is set or the
    /// HTTP client cannot be built.
    pub fn new(config: &CalendarConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(CalendarError::Configuration(
                "calendar base_url is not configured".to_string(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CalendarError::Configuration(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone().map(SecretString::from),
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

    /// Fetches the raw event rows for a region on a date.
    async fn fetch_events(&self, region: Region, date: NaiveDate) -> Result<Vec<RawCalendarEvent>> {
        let url = format!("{}/calendar", self.base_url);
        let day = date.format("%Y-%m-%d").to_string();
        tracing::debug!("GET {} for {} on {}", url, region, day);

        let mut request = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .query(&[
                ("country", region.country_name()),
                ("from", day.as_str()),
                ("to", day.as_str()),
            ]);
        if let Some(key) = &self.api_key {
            request = request.header("X-Api-Key", key.expose_secret());
        }

        let response = request.send().await?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(CalendarError::Authentication(format!(
                "calendar feed rejected the API key ({status})"
            )));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CalendarError::api(status.as_u16(), text));
        }

        let records = response.json::<Vec<RawCalendarEvent>>().await?;
        Ok(records)
    }
}

#[async_trait]
impl IndicatorSource for CalendarClient {
    async fn fetch_observations(
        &self,
        region: Region,
        date: NaiveDate,
    ) -> AnyResult<Vec<Observation>> {
        match self.fetch_events(region, date).await {
            Ok(records) => Ok(records_to_observations(&records, region, date)),
            Err(e) if e.is_transient() => {
                warn!(%region, %date, error = %e, "calendar fetch failed, degrading to empty batch");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &str {
        "calendar"
    }
}
