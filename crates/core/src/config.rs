use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::aggregate::BiasPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub worldbank: WorldBankConfig,
    pub calendar: CalendarConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database file; created on first use.
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldBankConfig {
    pub base_url: String,
    /// Data points requested per series; the two most recent non-null
    /// ones are used.
    pub per_page: u32,
    pub timeout_secs: u64,
    pub requests_per_minute: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Empty until the commercial calendar feed is configured.
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Overall-call policy: "band" or "majority".
    pub policy: String,
    pub band_upper: f64,
    pub band_lower: f64,
}

impl AnalysisConfig {
    /// Resolves the configured policy.
    ///
    /// # Errors
    ///
    /// Returns an error when `policy` names neither supported rule.
    pub fn bias_policy(&self) -> Result<BiasPolicy> {
        match self.policy.trim().to_lowercase().as_str() {
            "band" | "percent-band" | "percent_band" => Ok(BiasPolicy::PercentBand {
                upper: self.band_upper,
                lower: self.band_lower,
            }),
            "majority" => Ok(BiasPolicy::Majority),
            other => anyhow::bail!(
                "unknown bias policy '{other}' in [analysis] (expected 'band' or 'majority')"
            ),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: "fx_bias.db".to_string(),
            },
            worldbank: WorldBankConfig {
                base_url: "https://api.worldbank.org".to_string(),
                per_page: 10,
                timeout_secs: 10,
                requests_per_minute: 30,
            },
            calendar: CalendarConfig {
                base_url: String::new(),
                api_key: None,
                timeout_secs: 10,
            },
            analysis: AnalysisConfig {
                policy: "band".to_string(),
                band_upper: 60.0,
                band_lower: 40.0,
            },
        }
    }
}
