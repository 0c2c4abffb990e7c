//! Indicator catalog and polarity classification.
//!
//! Polarity answers one question per indicator: is a higher reading
//! historically favorable for the currency? Curated World Bank series
//! carry an explicit polarity and a one-line rationale; free-text
//! calendar indicators fall back to a keyword table. Indicators that
//! match neither are never guessed at; the evaluator skips them with a
//! typed reason.

use serde::{Deserialize, Serialize};

/// Whether a higher reading favors the currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    /// Higher actuals support the currency (growth, exports, jobs added).
    Favorable,
    /// Higher actuals weigh on the currency (inflation, unemployment, debt).
    Unfavorable,
}

impl Polarity {
    /// Contribution sign for a positive surprise.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Polarity::Favorable => 1.0,
            Polarity::Unfavorable => -1.0,
        }
    }
}

/// One curated World Bank series.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorSpec {
    /// World Bank series code, e.g. `NY.GDP.MKTP.CD`.
    pub code: &'static str,
    /// Human-readable indicator name used in reports and storage.
    pub name: &'static str,
    pub polarity: Polarity,
    /// One-line reading aid shown alongside verdicts.
    pub rationale: &'static str,
}

/// The World Bank series fetched for every region.
pub const WORLD_BANK_INDICATORS: &[IndicatorSpec] = &[
    IndicatorSpec {
        code: "NY.GDP.MKTP.CD",
        name: "GDP (current US$)",
        polarity: Polarity::Favorable,
        rationale: "Higher GDP usually signals economic strength and attracts investment flows.",
    },
    IndicatorSpec {
        code: "FP.CPI.TOTL.ZG",
        name: "Inflation, consumer prices (annual %)",
        polarity: Polarity::Unfavorable,
        rationale: "Rising inflation erodes purchasing power and weighs on the currency.",
    },
    IndicatorSpec {
        code: "SL.UEM.TOTL.ZS",
        name: "Unemployment, total (% of labor force)",
        polarity: Polarity::Unfavorable,
        rationale: "Higher unemployment points to a weaker economy.",
    },
    IndicatorSpec {
        code: "NE.EXP.GNFS.CD",
        name: "Exports of goods and services (current US$)",
        polarity: Polarity::Favorable,
        rationale: "Growing exports mean stronger external demand and currency inflows.",
    },
    IndicatorSpec {
        code: "NE.IMP.GNFS.CD",
        name: "Imports of goods and services (current US$)",
        polarity: Polarity::Unfavorable,
        rationale: "Heavy imports can widen the trade deficit and pressure the currency.",
    },
    IndicatorSpec {
        code: "GC.DOD.TOTL.GD.ZS",
        name: "Central government debt, total (% of GDP)",
        polarity: Polarity::Unfavorable,
        rationale: "High debt-to-GDP is a red flag for long-run currency stability.",
    },
];

/// Looks up a curated series by World Bank code.
#[must_use]
pub fn spec_by_code(code: &str) -> Option<&'static IndicatorSpec> {
    WORLD_BANK_INDICATORS.iter().find(|s| s.code == code)
}

/// Looks up a curated series by display name, case-insensitive.
#[must_use]
pub fn spec_by_name(name: &str) -> Option<&'static IndicatorSpec> {
    WORLD_BANK_INDICATORS
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
}

/// Rationale text for a curated indicator, if it has one.
#[must_use]
pub fn rationale_for(name: &str) -> Option<&'static str> {
    spec_by_name(name).map(|s| s.rationale)
}

// Keyword tables for free-text calendar indicator names. Checked against
// the lowercased name; the unfavorable table wins ties so "CPI" beats a
// stray growth word in the same title.
const UNFAVORABLE_KEYWORDS: &[&str] = &[
    "unemployment",
    "jobless",
    "inflation",
    "cpi",
    "ppi",
    "imports",
    "debt",
    "deficit",
    "bankruptcies",
];

const FAVORABLE_KEYWORDS: &[&str] = &[
    "gdp",
    "exports",
    "retail sales",
    "industrial production",
    "manufacturing production",
    "pmi",
    "employment change",
    "nonfarm payrolls",
    "payrolls",
    "consumer confidence",
    "business confidence",
    "trade balance",
    "current account",
    "interest rate",
    "rate decision",
    "housing starts",
    "building permits",
    "durable goods",
];

/// Classifies an indicator name into a polarity.
///
/// Curated catalog entries match first, then the keyword tables. Returns
/// `None` for names the tables do not cover; callers must treat that as
/// unknown, never as a default.
#[must_use]
pub fn classify_polarity(name: &str) -> Option<Polarity> {
    if let Some(spec) = spec_by_name(name) {
        return Some(spec.polarity);
    }

    let lowered = name.to_lowercase();
    if UNFAVORABLE_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return Some(Polarity::Unfavorable);
    }
    if FAVORABLE_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return Some(Polarity::Favorable);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_six_series() {
        assert_eq!(WORLD_BANK_INDICATORS.len(), 6);
    }

    #[test]
    fn catalog_codes_resolve() {
        let gdp = spec_by_code("NY.GDP.MKTP.CD").unwrap();
        assert_eq!(gdp.polarity, Polarity::Favorable);
        let cpi = spec_by_code("FP.CPI.TOTL.ZG").unwrap();
        assert_eq!(cpi.polarity, Polarity::Unfavorable);
        assert!(spec_by_code("XX.FAKE.CODE").is_none());
    }

    #[test]
    fn catalog_names_classify_ahead_of_keywords() {
        assert_eq!(
            classify_polarity("GDP (current US$)"),
            Some(Polarity::Favorable)
        );
        assert_eq!(
            classify_polarity("Imports of goods and services (current US$)"),
            Some(Polarity::Unfavorable)
        );
    }

    #[test]
    fn keyword_classification_covers_calendar_names() {
        assert_eq!(classify_polarity("German Unemployment Rate"), Some(Polarity::Unfavorable));
        assert_eq!(classify_polarity("US Nonfarm Payrolls"), Some(Polarity::Favorable));
        assert_eq!(classify_polarity("Core CPI m/m"), Some(Polarity::Unfavorable));
        assert_eq!(classify_polarity("Manufacturing PMI"), Some(Polarity::Favorable));
        assert_eq!(classify_polarity("Trade Balance"), Some(Polarity::Favorable));
    }

    #[test]
    fn unfavorable_keywords_win_mixed_titles() {
        // "GDP Deflator"-style titles that mention both sides resolve to
        // the unfavorable table deterministically.
        assert_eq!(
            classify_polarity("GDP Price Deflator Inflation"),
            Some(Polarity::Unfavorable)
        );
    }

    #[test]
    fn unknown_names_stay_unknown() {
        assert_eq!(classify_polarity("Bank Holiday"), None);
        assert_eq!(classify_polarity("Speech by Governor"), None);
        assert_eq!(classify_polarity(""), None);
    }

    #[test]
    fn every_catalog_entry_has_rationale() {
        for spec in WORLD_BANK_INDICATORS {
            assert!(!spec.rationale.is_empty(), "{} missing rationale", spec.code);
            assert!(rationale_for(spec.name).is_some());
        }
    }
}
