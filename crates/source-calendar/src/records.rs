//! Raw calendar records and their normalization into observations.
//!
//! Calendar feeds are messy: numeric values arrive as numbers or display
//! strings ("3.4%", "250K", "-"), field names differ between providers,
//! and rows for other countries or dates can slip in. Everything here is
//! tolerant on intake and strict on output: a record either becomes a
//! well-formed observation for the requested region and date or it is
//! dropped with a debug log.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use fx_bias_core::{parse_numeric, Observation, Region};

/// One event row as a calendar feed reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCalendarEvent {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, alias = "title", alias = "name")]
    pub event: Option<String>,
    #[serde(default)]
    pub actual: Option<Value>,
    #[serde(default)]
    pub forecast: Option<Value>,
    #[serde(default)]
    pub previous: Option<Value>,
}

impl RawCalendarEvent {
    /// The event's own date, when it parses. Feeds send either bare
    /// dates or full timestamps; the leading `YYYY-MM-DD` is enough.
    #[must_use]
    pub fn event_date(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?.trim();
        let prefix = raw.get(..10)?;
        NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
    }

    /// Normalizes this record for one region and date, or drops it.
    ///
    /// A record is dropped when it has no event name, when its country
    /// does not map to the requested region, or when it carries a
    /// parseable date other than the requested one. Value fields that
    /// fail numeric parsing become `None`; the evaluator turns those
    /// into typed skips.
    #[must_use]
    pub fn to_observation(&self, region: Region, date: NaiveDate) -> Option<Observation> {
        let name = self.event.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            debug!("dropping calendar record with no event name");
            return None;
        }

        if let Some(country) = self.country.as_deref() {
            match region_for_country(country) {
                Some(r) if r == region => {}
                Some(other) => {
                    debug!(event = name, country, %other, "dropping record for another region");
                    return None;
                }
                None => {
                    debug!(event = name, country, "dropping record with unmapped country");
                    return None;
                }
            }
        }

        if let Some(event_date) = self.event_date() {
            if event_date != date {
                debug!(event = name, %event_date, "dropping record outside requested date");
                return None;
            }
        }

        let mut obs = Observation::new(region, name, date);
        if let Some(v) = self.actual.as_ref().and_then(value_to_f64) {
            obs = obs.with_actual(v);
        }
        if let Some(v) = self.forecast.as_ref().and_then(value_to_f64) {
            obs = obs.with_forecast(v);
        }
        if let Some(v) = self.previous.as_ref().and_then(value_to_f64) {
            obs = obs.with_previous(v);
        }
        Some(obs)
    }
}

/// Maps a feed's country vocabulary onto a region. Feeds use country
/// names or currency codes; raw strings are never compared directly.
#[must_use]
pub fn region_for_country(raw: &str) -> Option<Region> {
    Region::from_country_name(raw)
        .or_else(|| Region::from_currency(raw))
        .or_else(|| Region::from_country_code(raw))
}

/// Normalizes a batch of raw records for one region and date.
#[must_use]
pub fn records_to_observations(
    records: &[RawCalendarEvent],
    region: Region,
    date: NaiveDate,
) -> Vec<Observation> {
    records
        .iter()
        .filter_map(|r| r.to_observation(region, date))
        .collect()
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn record(body: serde_json::Value) -> RawCalendarEvent {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn numeric_values_pass_through() {
        let r = record(json!({
            "date": "2025-03-14",
            "country": "United States",
            "event": "Core CPI m/m",
            "actual": 3.4,
            "forecast": 3.1,
            "previous": 3.2
        }));
        let obs = r.to_observation(Region::Usd, day()).unwrap();
        assert_eq!(obs.indicator, "Core CPI m/m");
        assert_eq!(obs.actual, Some(3.4));
        assert_eq!(obs.forecast, Some(3.1));
        assert_eq!(obs.previous, Some(3.2));
    }

    #[test]
    fn string_values_are_normalized() {
        let r = record(json!({
            "country": "United States",
            "event": "Nonfarm Payrolls",
            "actual": "250K",
            "forecast": "180K",
            "previous": "1,750.5"
        }));
        let obs = r.to_observation(Region::Usd, day()).unwrap();
        assert_eq!(obs.actual, Some(250_000.0));
        assert_eq!(obs.forecast, Some(180_000.0));
        assert_eq!(obs.previous, Some(1750.5));
    }

    #[test]
    fn percent_strings_keep_face_value() {
        let r = record(json!({
            "country": "Germany",
            "event": "Unemployment Rate",
            "actual": "5.9%",
            "forecast": "6.0%"
        }));
        let obs = r.to_observation(Region::Eur, day()).unwrap();
        assert_eq!(obs.actual, Some(5.9));
        assert_eq!(obs.forecast, Some(6.0));
    }

    #[test]
    fn unparseable_values_become_absent_not_zero() {
        let r = record(json!({
            "country": "Japan",
            "event": "GDP Growth Rate",
            "actual": "-",
            "forecast": "pending",
            "previous": null
        }));
        let obs = r.to_observation(Region::Jpy, day()).unwrap();
        assert_eq!(obs.actual, None);
        assert_eq!(obs.forecast, None);
        assert_eq!(obs.previous, None);
    }

    #[test]
    fn title_alias_is_accepted() {
        let r = record(json!({
            "country": "Canada",
            "title": "Employment Change",
            "actual": 25.3
        }));
        let obs = r.to_observation(Region::Cad, day()).unwrap();
        assert_eq!(obs.indicator, "Employment Change");
    }

    #[test]
    fn nameless_records_are_dropped() {
        let r = record(json!({"country": "Canada", "actual": 1.0}));
        assert!(r.to_observation(Region::Cad, day()).is_none());
    }

    #[test]
    fn other_regions_records_are_dropped() {
        let r = record(json!({
            "country": "Japan",
            "event": "Core CPI m/m",
            "actual": 2.7
        }));
        assert!(r.to_observation(Region::Usd, day()).is_none());
    }

    #[test]
    fn unmapped_countries_are_dropped() {
        let r = record(json!({
            "country": "Narnia",
            "event": "Core CPI m/m",
            "actual": 2.7
        }));
        assert!(r.to_observation(Region::Usd, day()).is_none());
    }

    #[test]
    fn currency_code_country_vocabulary_maps() {
        let r = record(json!({
            "country": "CHF",
            "event": "Trade Balance",
            "actual": 4.1
        }));
        let obs = r.to_observation(Region::Chf, day()).unwrap();
        assert_eq!(obs.region, Region::Chf);
    }

    #[test]
    fn missing_country_is_trusted() {
        let r = record(json!({"event": "Retail Sales m/m", "actual": 0.4}));
        assert!(r.to_observation(Region::Gbp, day()).is_some());
    }

    #[test]
    fn records_from_other_dates_are_dropped() {
        let r = record(json!({
            "date": "2025-03-12",
            "country": "United States",
            "event": "Core CPI m/m",
            "actual": 3.4
        }));
        assert!(r.to_observation(Region::Usd, day()).is_none());
    }

    #[test]
    fn timestamp_dates_match_on_the_day() {
        let r = record(json!({
            "date": "2025-03-14T13:30:00Z",
            "country": "United States",
            "event": "Core CPI m/m",
            "actual": 3.4
        }));
        assert!(r.to_observation(Region::Usd, day()).is_some());
    }

    #[test]
    fn batch_normalization_filters_and_keeps_order() {
        let records: Vec<RawCalendarEvent> = serde_json::from_value(json!([
            {"country": "United States", "event": "Core CPI m/m", "actual": "3.4%"},
            {"country": "Japan", "event": "GDP Growth Rate", "actual": 1.0},
            {"country": "United States", "event": "Retail Sales m/m", "actual": 0.4}
        ]))
        .unwrap();
        let observations = records_to_observations(&records, Region::Usd, day());
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].indicator, "Core CPI m/m");
        assert_eq!(observations[1].indicator, "Retail Sales m/m");
    }
}
