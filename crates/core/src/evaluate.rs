//! The bias evaluator: observations in, verdicts or typed skips out.
//!
//! Scoring rule: surprise = actual - baseline, rounded to two decimals.
//! A zero surprise is Neutral. Otherwise the verdict is Bullish exactly
//! when the surprise sign matches the indicator polarity sign. Flipping
//! polarity flips Bullish and Bearish; Neutral is unaffected.

use tracing::debug;

use crate::indicator::{classify_polarity, rationale_for, Polarity};
use crate::numeric::round2;
use crate::observation::Observation;
use crate::verdict::{Bias, EvalOutcome, SkipReason, SkippedRow, Verdict};

/// Scores one observation against a known polarity.
///
/// Pure and total: every observation yields either a verdict or a typed
/// skip, never an error and never a panic.
#[must_use]
pub fn evaluate(obs: &Observation, polarity: Polarity) -> EvalOutcome {
    let Some(actual) = obs.actual else {
        return skip(obs, SkipReason::MissingActual);
    };
    let Some(baseline) = obs.baseline() else {
        return skip(obs, SkipReason::MissingBaseline);
    };

    // Classification runs on the rounded surprise so the stored surprise
    // and the stored bias can never disagree.
    let surprise = round2(actual - baseline.value());
    let bias = if surprise == 0.0 {
        Bias::Neutral
    } else if (surprise > 0.0) == matches!(polarity, Polarity::Favorable) {
        Bias::Bullish
    } else {
        Bias::Bearish
    };

    EvalOutcome::Scored(Verdict {
        indicator: obs.indicator.clone(),
        actual,
        forecast: obs.forecast,
        previous: obs.previous,
        baseline,
        surprise,
        polarity,
        bias,
        rationale: rationale_for(&obs.indicator).map(ToOwned::to_owned),
    })
}

/// Scores a batch, resolving each polarity from the catalog and keyword
/// tables. Observations with unclassifiable indicators become typed
/// skips rather than guesses.
#[must_use]
pub fn evaluate_all(observations: &[Observation]) -> (Vec<Verdict>, Vec<SkippedRow>) {
    let mut verdicts = Vec::new();
    let mut skipped = Vec::new();

    for obs in observations {
        let outcome = match classify_polarity(&obs.indicator) {
            Some(polarity) => evaluate(obs, polarity),
            None => skip(obs, SkipReason::UnknownIndicator),
        };
        match outcome {
            EvalOutcome::Scored(verdict) => verdicts.push(verdict),
            EvalOutcome::Skipped(row) => {
                debug!(
                    indicator = %row.indicator,
                    reason = row.reason.describe(),
                    "skipping observation"
                );
                skipped.push(row);
            }
        }
    }

    (verdicts, skipped)
}

fn skip(obs: &Observation, reason: SkipReason) -> EvalOutcome {
    EvalOutcome::Skipped(SkippedRow {
        indicator: obs.indicator.clone(),
        reason,
    })
}
