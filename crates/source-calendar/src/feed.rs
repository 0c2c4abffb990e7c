//! Calendar feed files.
//!
//! Reads a JSON file of calendar event rows from disk instead of a paid
//! API. The file uses the same row shape the API returns, so exports
//! from other tools can be dropped in directly. A missing or malformed
//! file is an operator mistake and fails the fetch outright.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;

use fx_bias_core::{IndicatorSource, Observation, Region};

use crate::records::{records_to_observations, RawCalendarEvent};

/// Indicator source backed by a calendar feed file on disk.
pub struct JsonFeedSource {
    path: PathBuf,
}

impl JsonFeedSource {
    /// Creates a source reading from the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the feed file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl IndicatorSource for JsonFeedSource {
    async fn fetch_observations(
        &self,
        region: Region,
        date: NaiveDate,
    ) -> Result<Vec<Observation>> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading calendar feed {}", self.path.display()))?;
        let records: Vec<RawCalendarEvent> = serde_json::from_str(&text)
            .with_context(|| format!("parsing calendar feed {}", self.path.display()))?;
        Ok(records_to_observations(&records, region, date))
    }

    fn name(&self) -> &str {
        "feed"
    }
}
