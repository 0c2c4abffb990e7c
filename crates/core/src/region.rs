//! Canonical region identity and per-source vocabulary mapping.
//!
//! Every data source speaks its own vocabulary: the World Bank keys
//! series by ISO-3 country code, calendar feeds label events with
//! country names, users ask for currency codes. `Region` is the single
//! canonical identity; each source translates at its own boundary and
//! raw vocabulary strings are never compared across sources.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A supported currency region, keyed by ISO-4217 currency code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Usd,
    Eur,
    Jpy,
    Gbp,
    Cad,
    Aud,
    Chf,
}

impl Region {
    /// All supported regions, in display order.
    #[must_use]
    pub const fn all() -> &'static [Region] {
        &[
            Region::Usd,
            Region::Eur,
            Region::Jpy,
            Region::Gbp,
            Region::Cad,
            Region::Aud,
            Region::Chf,
        ]
    }

    /// ISO-4217 currency code. This is the canonical identifier used in
    /// storage and display.
    #[must_use]
    pub const fn currency(self) -> &'static str {
        match self {
            Region::Usd => "USD",
            Region::Eur => "EUR",
            Region::Jpy => "JPY",
            Region::Gbp => "GBP",
            Region::Cad => "CAD",
            Region::Aud => "AUD",
            Region::Chf => "CHF",
        }
    }

    /// ISO-3 country code as used by the World Bank API.
    ///
    /// The euro has no single issuer; Germany stands in as the bloc's
    /// largest economy.
    #[must_use]
    pub const fn country_code(self) -> &'static str {
        match self {
            Region::Usd => "USA",
            Region::Eur => "DEU",
            Region::Jpy => "JPN",
            Region::Gbp => "GBR",
            Region::Cad => "CAN",
            Region::Aud => "AUS",
            Region::Chf => "CHE",
        }
    }

    /// Country name as used by calendar feeds.
    #[must_use]
    pub const fn country_name(self) -> &'static str {
        match self {
            Region::Usd => "United States",
            Region::Eur => "Germany",
            Region::Jpy => "Japan",
            Region::Gbp => "United Kingdom",
            Region::Cad => "Canada",
            Region::Aud => "Australia",
            Region::Chf => "Switzerland",
        }
    }

    /// Looks up a region by currency code, case-insensitive.
    #[must_use]
    pub fn from_currency(code: &str) -> Option<Region> {
        Region::all()
            .iter()
            .copied()
            .find(|r| r.currency().eq_ignore_ascii_case(code.trim()))
    }

    /// Looks up a region by ISO-3 country code, case-insensitive.
    #[must_use]
    pub fn from_country_code(code: &str) -> Option<Region> {
        Region::all()
            .iter()
            .copied()
            .find(|r| r.country_code().eq_ignore_ascii_case(code.trim()))
    }

    /// Looks up a region by country name, case-insensitive.
    #[must_use]
    pub fn from_country_name(name: &str) -> Option<Region> {
        Region::all()
            .iter()
            .copied()
            .find(|r| r.country_name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.currency())
    }
}

impl FromStr for Region {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::from_currency(s).ok_or_else(|| {
            anyhow::anyhow!(
                "unknown region '{s}' (expected one of: USD, EUR, JPY, GBP, CAD, AUD, CHF)"
            )
        })
    }
}
