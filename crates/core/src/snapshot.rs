//! Persisted snapshot rows.
//!
//! One row per scored verdict, keyed by `(date, currency, indicator)`.
//! The row carries the verdict's inputs and outcome but not its
//! polarity; polarity is recovered on read-back from the sign relation
//! between surprise and bias.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::indicator::{classify_polarity, rationale_for, Polarity};
use crate::observation::Baseline;
use crate::region::Region;
use crate::verdict::{Bias, Verdict};

/// One persisted snapshot row, column for column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub date: NaiveDate,
    /// Canonical region identity (ISO-4217 code).
    pub currency: String,
    pub indicator: String,
    pub actual: f64,
    pub forecast: Option<f64>,
    pub previous: Option<f64>,
    pub surprise: f64,
    pub bias: Bias,
}

impl SnapshotRow {
    /// Builds the persisted form of a verdict.
    #[must_use]
    pub fn from_verdict(region: Region, date: NaiveDate, verdict: &Verdict) -> Self {
        Self {
            date,
            currency: region.currency().to_string(),
            indicator: verdict.indicator.clone(),
            actual: verdict.actual,
            forecast: verdict.forecast,
            previous: verdict.previous,
            surprise: verdict.surprise,
            bias: verdict.bias,
        }
    }

    /// Rehydrates the verdict this row was written from.
    ///
    /// # Errors
    ///
    /// Fails on a corrupt row that carries neither a forecast nor a
    /// previous value; scored rows always persist at least one.
    pub fn to_verdict(&self) -> Result<Verdict> {
        let Some(baseline) = self
            .forecast
            .map(Baseline::Forecast)
            .or(self.previous.map(Baseline::Previous))
        else {
            bail!(
                "corrupt snapshot row for {} {} on {}: no baseline stored",
                self.currency,
                self.indicator,
                self.date
            );
        };

        // Polarity is not a column. Recover it from the catalog when the
        // indicator is known, else from the surprise/bias sign relation.
        let polarity = classify_polarity(&self.indicator).unwrap_or_else(|| {
            if self.surprise == 0.0 || (self.surprise > 0.0) == (self.bias == Bias::Bullish) {
                Polarity::Favorable
            } else {
                Polarity::Unfavorable
            }
        });

        Ok(Verdict {
            indicator: self.indicator.clone(),
            actual: self.actual,
            forecast: self.forecast,
            previous: self.previous,
            baseline,
            surprise: self.surprise,
            polarity,
            bias: self.bias,
            rationale: rationale_for(&self.indicator).map(ToOwned::to_owned),
        })
    }
}
