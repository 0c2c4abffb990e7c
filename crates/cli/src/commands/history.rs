//! Snapshot history CLI command.
//!
//! Prints the stored snapshot rows for one region across a date range,
//! newest first, without touching any live source.

use anyhow::{bail, Context, Result};
use chrono::{Duration, NaiveDate};
use clap::Args;

use fx_bias_core::{format_value, ConfigLoader, Region, SnapshotRow, SnapshotStore};
use fx_bias_data::SqliteStore;

/// Arguments for the history command.
#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    /// Region to show history for, by currency code (e.g., "USD")
    #[arg(long)]
    pub region: String,

    /// Days of history to show, ending at the range end
    #[arg(long, default_value_t = 30)]
    pub days: u32,

    /// Range start (YYYY-MM-DD, overrides --days)
    #[arg(long)]
    pub from: Option<String>,

    /// Range end (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub to: Option<String>,

    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,
}

/// Runs the history command.
///
/// # Errors
/// Returns an error for unknown regions, unparseable dates, an inverted
/// range, or store failures.
pub async fn run_history(args: HistoryArgs) -> Result<()> {
    let region: Region = args.region.parse()?;
    let today = chrono::Local::now().date_naive();
    let (from, to) = resolve_range(args.days, args.from.as_deref(), args.to.as_deref(), today)?;

    let config = ConfigLoader::load_from(&args.config)?;
    let store = SqliteStore::open(&config.database.path).await?;
    let rows = store.history(region, from, to).await?;

    if rows.is_empty() {
        println!("No stored snapshots for {region} between {from} and {to}");
        return Ok(());
    }

    print_history(region, from, to, &rows);

    Ok(())
}

fn resolve_range(
    days: u32,
    from: Option<&str>,
    to: Option<&str>,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate)> {
    let to_date = match to {
        Some(s) => parse_date(s)?,
        None => today,
    };
    let from_date = match from {
        Some(s) => parse_date(s)?,
        None => to_date - Duration::days(i64::from(days)),
    };
    if from_date > to_date {
        bail!("range start {from_date} is after range end {to_date}");
    }
    Ok((from_date, to_date))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}' (expected YYYY-MM-DD)"))
}

fn print_history(region: Region, from: NaiveDate, to: NaiveDate, rows: &[SnapshotRow]) {
    println!();
    println!("{}", "=".repeat(96));
    println!("  {region} SNAPSHOT HISTORY  {from} to {to}");
    println!("{}", "=".repeat(96));
    println!(
        "{:<12} {:<40} {:>12} {:>12} {:>9}",
        "Date", "Indicator", "Actual", "Surprise", "Bias"
    );
    println!("{}", "-".repeat(96));

    for row in rows {
        println!(
            "{:<12} {:<40} {:>12} {:>+12.2} {:>9}",
            row.date.to_string(),
            row.indicator,
            format_value(row.actual),
            row.surprise,
            row.bias.to_string()
        );
    }

    println!("{}", "-".repeat(96));
    let days = count_distinct_dates(rows);
    println!("{} rows across {} day(s)", rows.len(), days);
    println!();
}

fn count_distinct_dates(rows: &[SnapshotRow]) -> usize {
    let mut dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
    dates.dedup();
    dates.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fx_bias_core::Bias;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn default_range_counts_back_from_today() {
        let (from, to) = resolve_range(30, None, None, anchor()).unwrap();
        assert_eq!(to, anchor());
        assert_eq!(from, NaiveDate::from_ymd_opt(2025, 2, 12).unwrap());
    }

    #[test]
    fn explicit_bounds_override_days() {
        let (from, to) = resolve_range(30, Some("2025-01-01"), Some("2025-01-31"), anchor()).unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
    }

    #[test]
    fn from_with_default_end_runs_to_today() {
        let (from, to) = resolve_range(30, Some("2025-03-01"), None, anchor()).unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(to, anchor());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = resolve_range(30, Some("2025-03-20"), Some("2025-03-10"), anchor()).unwrap_err();
        assert!(err.to_string().contains("after range end"));
    }

    #[test]
    fn bad_date_is_rejected() {
        assert!(resolve_range(30, Some("March 1"), None, anchor()).is_err());
    }

    #[test]
    fn distinct_dates_counts_runs_not_rows() {
        let day = |d: u32| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();
        let row = |date: NaiveDate, indicator: &str| SnapshotRow {
            date,
            currency: "USD".to_string(),
            indicator: indicator.to_string(),
            actual: 1.0,
            forecast: Some(1.0),
            previous: None,
            surprise: 0.0,
            bias: Bias::Neutral,
        };

        let rows = vec![
            row(day(14), "A"),
            row(day(14), "B"),
            row(day(13), "A"),
            row(day(12), "A"),
            row(day(12), "B"),
        ];
        assert_eq!(count_distinct_dates(&rows), 3);
    }
}
