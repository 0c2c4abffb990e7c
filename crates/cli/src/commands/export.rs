//! CSV export CLI command.
//!
//! Dumps stored snapshot rows for one region across a date range into a
//! CSV file with the store's column layout.

use anyhow::{bail, Context, Result};
use chrono::{Duration, NaiveDate};
use clap::Args;

use fx_bias_core::{ConfigLoader, Region, SnapshotStore};
use fx_bias_data::{CsvExporter, SqliteStore};

/// Arguments for the export command.
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Region to export, by currency code (e.g., "USD")
    #[arg(long)]
    pub region: String,

    /// Output CSV file path
    #[arg(short, long)]
    pub output: String,

    /// Days of history to export, ending at the range end
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

/// Runs the export command.
///
/// # Errors
/// Returns an error for unknown regions, unparseable dates, an empty
/// range, or when the output file cannot be written.
pub async fn run_export(args: ExportArgs) -> Result<()> {
    let region: Region = args.region.parse()?;
    let today = chrono::Local::now().date_naive();
    let (from, to) = resolve_range(args.days, args.from.as_deref(), args.to.as_deref(), today)?;

    let config = ConfigLoader::load_from(&args.config)?;
    let store = SqliteStore::open(&config.database.path).await?;
    let rows = store.history(region, from, to).await?;

    if rows.is_empty() {
        bail!("no stored snapshots for {region} between {from} and {to}, nothing to export");
    }

    CsvExporter::write_file(&args.output, &rows)?;
    tracing::info!("Wrote {} rows to {}", rows.len(), args.output);
    println!(
        "Exported {} snapshot row(s) for {} to {}",
        rows.len(),
        region,
        args.output
    );

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
