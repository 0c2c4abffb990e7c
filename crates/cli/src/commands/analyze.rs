//! Bias analysis CLI command.
//!
//! Runs one full analysis for a region and date: same-day snapshots come
//! from the local store unless `--force` is given, otherwise the chosen
//! source is fetched, scored, and persisted. Prints the verdict table,
//! summary, and per-indicator explanation lines.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Args;

use fx_bias_calendar::{CalendarClient, JsonFeedSource};
use fx_bias_core::{
    AnalysisReport, AnalysisSession, AppConfig, BiasPolicy, ConfigLoader, IndicatorSource, Region,
    ReportFormatter,
};
use fx_bias_data::SqliteStore;
use fx_bias_worldbank::WorldBankClient;

/// Arguments for the analyze command.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Region to analyze, by currency code (e.g., "USD", "EUR")
    #[arg(long)]
    pub region: String,

    /// Analysis date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<String>,

    /// Data source: "worldbank", "calendar", or "feed"
    #[arg(long, default_value = "worldbank")]
    pub source: String,

    /// Calendar feed file (required with --source feed)
    #[arg(long)]
    pub feed_path: Option<String>,

    /// Overall-call policy override: "band" or "majority"
    #[arg(long)]
    pub policy: Option<String>,

    /// Ignore same-day stored snapshots and fetch fresh data
    #[arg(long)]
    pub force: bool,

    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,
}

/// Runs the analyze command.
///
/// # Errors
/// Returns an error for unknown regions, unparseable dates, store or
/// source failures, and when neither the live fetch nor stored history
/// has any data for the region.
pub async fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let region: Region = args.region.parse()?;
    let date = resolve_date(args.date.as_deref())?;
    let config = ConfigLoader::load_from(&args.config)?;
    let policy = resolve_policy(args.policy.as_deref(), &config)?;

    tracing::info!("Analyzing {} for {} via {}", region, date, args.source);

    let store = SqliteStore::open(&config.database.path).await?;

    let report = match args.source.as_str() {
        "worldbank" => {
            let source = WorldBankClient::new(&config.worldbank)?;
            analyze_with(source, store, policy, region, date, args.force).await?
        }
        "calendar" => {
            let source = CalendarClient::new(&config.calendar)?;
            analyze_with(source, store, policy, region, date, args.force).await?
        }
        "feed" => {
            let path = args
                .feed_path
                .as_deref()
                .context("--feed-path <FILE> is required with --source feed")?;
            let source = JsonFeedSource::new(path);
            analyze_with(source, store, policy, region, date, args.force).await?
        }
        other => bail!("unknown source '{other}' (expected 'worldbank', 'calendar', or 'feed')"),
    };

    println!("{}", ReportFormatter::format(&report));
    println!("{}", ReportFormatter::format_explanations(&report));

    Ok(())
}

async fn analyze_with<S: IndicatorSource>(
    source: S,
    store: SqliteStore,
    policy: BiasPolicy,
    region: Region,
    date: NaiveDate,
    force: bool,
) -> Result<AnalysisReport> {
    let mut session = AnalysisSession::new(source, store, policy);
    let report = session.analyze(region, date, force).await?;
    Ok(report)
}

fn resolve_date(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{s}' (expected YYYY-MM-DD)")),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// A `--policy` flag picks the rule; band bounds always come from config.
fn resolve_policy(override_name: Option<&str>, config: &AppConfig) -> Result<BiasPolicy> {
    let Some(name) = override_name else {
        return config.analysis.bias_policy();
    };
    match name.parse::<BiasPolicy>()? {
        BiasPolicy::PercentBand { .. } => Ok(BiasPolicy::PercentBand {
            upper: config.analysis.band_upper,
            lower: config.analysis.band_lower,
        }),
        BiasPolicy::Majority => Ok(BiasPolicy::Majority),
    }
}
