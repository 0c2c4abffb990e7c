//! The bias aggregator: verdicts in, one summary out.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::verdict::{Bias, Verdict};

/// Policy for deciding the overall call from verdict counts.
///
/// The two policies are not numerically equivalent: three bullish
/// against two bearish is 60.0%, which the strict band rejects but the
/// majority rule accepts. Exactly one policy is in force per summary and
/// the summary records which.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BiasPolicy {
    /// Bullish when `bullish_pct` is strictly above `upper`, Bearish when
    /// strictly below `lower`, Neutral inside the band.
    PercentBand { upper: f64, lower: f64 },
    /// Bullish when bullish verdicts strictly outnumber bearish ones.
    Majority,
}

impl BiasPolicy {
    /// The canonical 60/40 strict band.
    #[must_use]
    pub const fn default_band() -> Self {
        BiasPolicy::PercentBand {
            upper: 60.0,
            lower: 40.0,
        }
    }

    fn classify(self, bullish: usize, bearish: usize, bullish_pct: f64) -> Bias {
        match self {
            BiasPolicy::PercentBand { upper, lower } => {
                if bullish + bearish == 0 {
                    Bias::Neutral
                } else if bullish_pct > upper {
                    Bias::Bullish
                } else if bullish_pct < lower {
                    Bias::Bearish
                } else {
                    Bias::Neutral
                }
            }
            BiasPolicy::Majority => {
                if bullish > bearish {
                    Bias::Bullish
                } else if bearish > bullish {
                    Bias::Bearish
                } else {
                    Bias::Neutral
                }
            }
        }
    }
}

impl Default for BiasPolicy {
    fn default() -> Self {
        Self::default_band()
    }
}

impl FromStr for BiasPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "band" | "percent-band" | "percent_band" => Ok(BiasPolicy::default_band()),
            "majority" => Ok(BiasPolicy::Majority),
            other => anyhow::bail!("unknown bias policy '{other}' (expected 'band' or 'majority')"),
        }
    }
}

/// Aggregate over one region and date's verdicts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub bullish: usize,
    pub bearish: usize,
    pub neutral: usize,
    /// Observations dropped before scoring; excluded from every ratio.
    pub skipped: usize,
    /// Bullish share of directional verdicts only, in percent. Zero when
    /// no directional verdicts exist.
    pub bullish_pct: f64,
    /// Net count, bullish minus bearish.
    pub score: i64,
    pub overall: Bias,
    pub policy: BiasPolicy,
}

/// Reduces verdicts to one summary under the given policy.
///
/// Neutral verdicts and skipped observations dilute neither the percent
/// ratio nor the net score. Empty input yields a zeroed Neutral summary;
/// this function never fails.
#[must_use]
pub fn aggregate(verdicts: &[Verdict], skipped: usize, policy: BiasPolicy) -> Summary {
    let bullish = verdicts.iter().filter(|v| v.bias == Bias::Bullish).count();
    let bearish = verdicts.iter().filter(|v| v.bias == Bias::Bearish).count();
    let neutral = verdicts.iter().filter(|v| v.bias == Bias::Neutral).count();

    let directional = bullish + bearish;
    let bullish_pct = if directional == 0 {
        0.0
    } else {
        bullish as f64 / directional as f64 * 100.0
    };

    let score = bullish as i64 - bearish as i64;
    let overall = policy.classify(bullish, bearish, bullish_pct);

    Summary {
        bullish,
        bearish,
        neutral,
        skipped,
        bullish_pct,
        score,
        overall,
        policy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::Polarity;
    use crate::observation::Baseline;

    fn verdict(bias: Bias) -> Verdict {
        Verdict {
            indicator: "Test Series".to_string(),
            actual: 1.0,
            forecast: Some(0.5),
            previous: None,
            baseline: Baseline::Forecast(0.5),
            surprise: 0.5,
            polarity: Polarity::Favorable,
            bias,
            rationale: None,
        }
    }

    fn verdicts(bullish: usize, bearish: usize, neutral: usize) -> Vec<Verdict> {
        let mut out = Vec::new();
        out.extend(std::iter::repeat_with(|| verdict(Bias::Bullish)).take(bullish));
        out.extend(std::iter::repeat_with(|| verdict(Bias::Bearish)).take(bearish));
        out.extend(std::iter::repeat_with(|| verdict(Bias::Neutral)).take(neutral));
        out
    }

    #[test]
    fn counts_and_score() {
        let summary = aggregate(&verdicts(4, 1, 2), 3, BiasPolicy::default_band());
        assert_eq!(summary.bullish, 4);
        assert_eq!(summary.bearish, 1);
        assert_eq!(summary.neutral, 2);
        assert_eq!(summary.skipped, 3);
        assert_eq!(summary.score, 3);
        assert_eq!(summary.bullish_pct, 80.0);
    }

    #[test]
    fn band_above_upper_is_bullish() {
        let summary = aggregate(&verdicts(4, 1, 0), 0, BiasPolicy::default_band());
        assert_eq!(summary.overall, Bias::Bullish);
    }

    #[test]
    fn band_below_lower_is_bearish() {
        let summary = aggregate(&verdicts(1, 4, 0), 0, BiasPolicy::default_band());
        assert_eq!(summary.overall, Bias::Bearish);
    }

    #[test]
    fn band_bounds_are_strict() {
        // Exactly 60% sits inside the band.
        let summary = aggregate(&verdicts(3, 2, 0), 0, BiasPolicy::default_band());
        assert_eq!(summary.bullish_pct, 60.0);
        assert_eq!(summary.overall, Bias::Neutral);

        // Exactly 40% does too.
        let summary = aggregate(&verdicts(2, 3, 0), 0, BiasPolicy::default_band());
        assert_eq!(summary.bullish_pct, 40.0);
        assert_eq!(summary.overall, Bias::Neutral);
    }

    #[test]
    fn majority_breaks_the_same_split_bullish() {
        // The canonical divergence case between the two policies.
        let summary = aggregate(&verdicts(3, 2, 0), 0, BiasPolicy::Majority);
        assert_eq!(summary.overall, Bias::Bullish);
    }

    #[test]
    fn majority_tie_is_neutral() {
        let summary = aggregate(&verdicts(2, 2, 5), 0, BiasPolicy::Majority);
        assert_eq!(summary.overall, Bias::Neutral);
        assert_eq!(summary.score, 0);
    }

    #[test]
    fn neutrals_do_not_dilute_the_ratio() {
        // 3 bullish, 1 bearish, 6 neutral: the ratio runs on directional
        // verdicts only, so this is 75%, not 30%.
        let summary = aggregate(&verdicts(3, 1, 6), 0, BiasPolicy::default_band());
        assert_eq!(summary.bullish_pct, 75.0);
        assert_eq!(summary.overall, Bias::Bullish);
    }

    #[test]
    fn skips_do_not_dilute_the_ratio() {
        let with_skips = aggregate(&verdicts(3, 1, 0), 10, BiasPolicy::default_band());
        let without = aggregate(&verdicts(3, 1, 0), 0, BiasPolicy::default_band());
        assert_eq!(with_skips.bullish_pct, without.bullish_pct);
        assert_eq!(with_skips.overall, without.overall);
        assert_eq!(with_skips.skipped, 10);
    }

    #[test]
    fn empty_input_is_zeroed_neutral() {
        let summary = aggregate(&[], 0, BiasPolicy::default_band());
        assert_eq!(summary.overall, Bias::Neutral);
        assert_eq!(summary.bullish_pct, 0.0);
        assert_eq!(summary.score, 0);
    }

    #[test]
    fn all_neutral_input_is_neutral_not_bearish() {
        // Zero directional verdicts must not read as 0% bullish.
        let summary = aggregate(&verdicts(0, 0, 4), 0, BiasPolicy::default_band());
        assert_eq!(summary.overall, Bias::Neutral);
    }

    #[test]
    fn policy_parses_from_cli_strings() {
        assert_eq!(
            "band".parse::<BiasPolicy>().unwrap(),
            BiasPolicy::default_band()
        );
        assert_eq!("majority".parse::<BiasPolicy>().unwrap(), BiasPolicy::Majority);
        assert!("plurality".parse::<BiasPolicy>().is_err());
    }
}
