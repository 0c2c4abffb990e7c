//! Verdicts: the scored form of one observation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::indicator::Polarity;
use crate::numeric::format_value;
use crate::observation::Baseline;

/// Directional read of one indicator surprise for the currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

impl Bias {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Bias::Bullish => "Bullish",
            Bias::Bearish => "Bearish",
            Bias::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Bias {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("bullish") {
            Ok(Bias::Bullish)
        } else if trimmed.eq_ignore_ascii_case("bearish") {
            Ok(Bias::Bearish)
        } else if trimmed.eq_ignore_ascii_case("neutral") {
            Ok(Bias::Neutral)
        } else {
            anyhow::bail!("unknown bias label '{s}'")
        }
    }
}

/// Why an observation was dropped before scoring.
///
/// Skips are first-class outcomes: every reason is counted, logged, and
/// reported, never silently swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The source never published an actual reading.
    MissingActual,
    /// Neither a forecast nor a previous value exists to compare against.
    MissingBaseline,
    /// The indicator name matched neither the catalog nor the keyword tables.
    UnknownIndicator,
}

impl SkipReason {
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            SkipReason::MissingActual => "no actual value published",
            SkipReason::MissingBaseline => "no forecast or previous value to compare against",
            SkipReason::UnknownIndicator => "indicator polarity unknown",
        }
    }
}

/// An observation that could not be scored, with the reason why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub indicator: String,
    pub reason: SkipReason,
}

/// The scored form of one observation.
///
/// `surprise` is already rounded to two decimals and `bias` was
/// classified from that rounded value, so the two never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub indicator: String,
    pub actual: f64,
    /// Forecast as reported, kept even when previous served as baseline.
    pub forecast: Option<f64>,
    /// Previous reading as reported.
    pub previous: Option<f64>,
    /// The operand actually compared against.
    pub baseline: Baseline,
    pub surprise: f64,
    pub polarity: Polarity,
    pub bias: Bias,
    /// Catalog rationale, when the indicator is a curated series.
    pub rationale: Option<String>,
}

impl Verdict {
    /// One-line trace of how this verdict was reached.
    ///
    /// Shape: `Core CPI m/m: Actual 3.40 vs Forecast 3.10 → Surprise 0.30 → Bearish`.
    #[must_use]
    pub fn explanation(&self) -> String {
        format!(
            "{}: Actual {} vs {} {} → Surprise {:.2} → {}",
            self.indicator,
            format_value(self.actual),
            self.baseline.label(),
            format_value(self.baseline.value()),
            self.surprise,
            self.bias,
        )
    }
}

/// Result of evaluating one observation.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalOutcome {
    Scored(Verdict),
    Skipped(SkippedRow),
}
