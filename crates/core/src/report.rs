#![allow(clippy::format_push_string)]
#![allow(clippy::uninlined_format_args)]

use crate::numeric::format_value;
use crate::session::{AnalysisReport, Freshness};
use crate::verdict::Bias;

pub struct ReportFormatter;

impl ReportFormatter {
    #[must_use]
    pub fn format(report: &AnalysisReport) -> String {
        let mut output = String::new();

        let freshness = match report.freshness {
            Freshness::Live => "live".to_string(),
            Freshness::Cached => "cached".to_string(),
            Freshness::Stale { as_of } => format!("STALE, data from {}", as_of),
        };

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════════════════════\n");
        output.push_str(&format!(
            "  {} MACRO BIAS  ·  {}  ({})\n",
            report.region.currency(),
            report.as_of,
            freshness
        ));
        output.push_str("═══════════════════════════════════════════════════════════════════════════════\n");
        output.push('\n');

        // Verdicts
        output.push_str(&format!(
            "{:<42} {:>12} {:>12} {:>9}\n",
            "Indicator", "Actual", "Baseline", "Bias"
        ));
        output.push_str("───────────────────────────────────────────────────────────────────────────────\n");
        for verdict in &report.verdicts {
            output.push_str(&format!(
                "{:<42} {:>12} {:>12} {:>9}\n",
                truncate(&verdict.indicator, 42),
                format_value(verdict.actual),
                format_value(verdict.baseline.value()),
                verdict.bias
            ));
        }

        if !report.skipped.is_empty() {
            output.push('\n');
            output.push_str("Skipped\n");
            output.push_str("───────────────────────────────────────────────────────────────────────────────\n");
            for row in &report.skipped {
                output.push_str(&format!(
                    "{:<42} {}\n",
                    truncate(&row.indicator, 42),
                    row.reason.describe()
                ));
            }
        }

        // Summary
        let summary = &report.summary;
        output.push('\n');
        output.push_str("Summary\n");
        output.push_str("───────────────────────────────────────────────────────────────────────────────\n");
        output.push_str(&format!(
            "Bullish: {}   Bearish: {}   Neutral: {}   Skipped: {}\n",
            summary.bullish, summary.bearish, summary.neutral, summary.skipped
        ));
        output.push_str(&format!("Net Score:             {:+}\n", summary.score));
        if summary.bullish + summary.bearish > 0 {
            output.push_str(&format!("Bullish Share:         {:.1}%\n", summary.bullish_pct));
        } else {
            output.push_str("Bullish Share:         N/A (no directional verdicts)\n");
        }
        output.push_str(&format!("Overall:               {}\n", summary.overall));
        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════════════════════\n");

        if summary.overall == Bias::Neutral && summary.bullish + summary.bearish > 0 {
            output.push_str("\nMixed signals; no side clears the band.\n");
        }

        output
    }

    /// Explanation lines with rationales, one block per verdict.
    #[must_use]
    pub fn format_explanations(report: &AnalysisReport) -> String {
        let mut output = String::new();
        output.push_str("Explanations\n");
        output.push_str("───────────────────────────────────────────────────────────────────────────────\n");
        for verdict in &report.verdicts {
            output.push_str(&verdict.explanation());
            output.push('\n');
            if let Some(rationale) = &verdict.rationale {
                output.push_str(&format!("    {}\n", rationale));
            }
        }
        output
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
