//! Observations: one macro data point as delivered by a source.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::region::Region;

/// The comparison operand chosen for scoring an observation.
///
/// Forecast is always preferred; previous is the fallback when no
/// forecast was published.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Baseline {
    Forecast(f64),
    Previous(f64),
}

impl Baseline {
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Baseline::Forecast(v) | Baseline::Previous(v) => v,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Baseline::Forecast(_) => "Forecast",
            Baseline::Previous(_) => "Previous",
        }
    }
}

/// One macroeconomic observation for a region.
///
/// Sources normalize their raw payloads into this shape. A field is
/// `None` whenever the source omitted the value or it failed numeric
/// parsing; absence is preserved, never defaulted to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub region: Region,
    pub indicator: String,
    pub date: NaiveDate,
    pub actual: Option<f64>,
    pub forecast: Option<f64>,
    pub previous: Option<f64>,
}

impl Observation {
    /// Creates an observation with no values attached yet.
    #[must_use]
    pub fn new(region: Region, indicator: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            region,
            indicator: indicator.into(),
            date,
            actual: None,
            forecast: None,
            previous: None,
        }
    }

    #[must_use]
    pub fn with_actual(mut self, value: f64) -> Self {
        self.actual = Some(value);
        self
    }

    #[must_use]
    pub fn with_forecast(mut self, value: f64) -> Self {
        self.forecast = Some(value);
        self
    }

    #[must_use]
    pub fn with_previous(mut self, value: f64) -> Self {
        self.previous = Some(value);
        self
    }

    /// The baseline this observation would be scored against, if any.
    #[must_use]
    pub fn baseline(&self) -> Option<Baseline> {
        self.forecast
            .map(Baseline::Forecast)
            .or(self.previous.map(Baseline::Previous))
    }
}
