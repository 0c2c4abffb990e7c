use chrono::NaiveDate;

use fx_bias_calendar::JsonFeedSource;
use fx_bias_core::{
    AnalysisSession, Bias, BiasPolicy, Freshness, Region, ReportFormatter, SessionError,
    SessionState, SnapshotStore,
};
use fx_bias_data::{CsvExporter, SqliteStore};

const FEED: &str = r#"[
    {"date": "2025-03-14", "country": "United States", "event": "Nonfarm Payrolls",
     "actual": "250K", "forecast": "200K"},
    {"date": "2025-03-14", "country": "United States", "event": "Unemployment Rate",
     "actual": "4.0%", "forecast": "4.2%"},
    {"date": "2025-03-14", "country": "United States", "event": "Core CPI m/m",
     "actual": "0.4%", "forecast": "0.3%"},
    {"date": "2025-03-14", "country": "United States", "event": "Mystery Index",
     "actual": "1.0"}
]"#;

fn write_feed(name: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("{}_{}.json", name, std::process::id()));
    std::fs::write(&path, FEED).expect("write feed file");
    path
}

fn analysis_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

#[tokio::test]
async fn feed_analysis_scores_persists_and_exports() {
    let feed_path = write_feed("cli_e2e_scores");
    let store = SqliteStore::open_in_memory().await.expect("open store");
    let mut session = AnalysisSession::new(
        JsonFeedSource::new(&feed_path),
        store.clone(),
        BiasPolicy::default_band(),
    );

    let report = session
        .analyze(Region::Usd, analysis_date(), false)
        .await
        .expect("analysis should succeed");
    std::fs::remove_file(&feed_path).ok();

    // Payrolls beat and a falling unemployment rate are bullish; the hot
    // CPI print is bearish; the unknown index is skipped.
    assert_eq!(report.freshness, Freshness::Live);
    assert_eq!(report.summary.bullish, 2);
    assert_eq!(report.summary.bearish, 1);
    assert_eq!(report.summary.neutral, 0);
    assert_eq!(report.summary.skipped, 1);
    assert_eq!(report.summary.score, 1);
    assert_eq!(report.summary.overall, Bias::Bullish);
    assert_eq!(session.state(), SessionState::Scored);

    let rendered = ReportFormatter::format(&report);
    assert!(rendered.contains("USD MACRO BIAS"));
    assert!(rendered.contains("Nonfarm Payrolls"));

    // The scored verdicts are now queryable history, exportable as CSV.
    let rows = store
        .history(Region::Usd, analysis_date(), analysis_date())
        .await
        .expect("history query");
    assert_eq!(rows.len(), 3);

    let mut csv = Vec::new();
    CsvExporter::write_rows(&mut csv, &rows).expect("csv export");
    let csv_text = String::from_utf8(csv).unwrap();
    assert!(csv_text.starts_with("date,currency,indicator"));
    assert!(csv_text.contains("Nonfarm Payrolls"));
}

#[tokio::test]
async fn same_day_rerun_is_served_from_the_store() {
    let feed_path = write_feed("cli_e2e_cache");
    let store = SqliteStore::open_in_memory().await.expect("open store");
    let mut session = AnalysisSession::new(
        JsonFeedSource::new(&feed_path),
        store,
        BiasPolicy::default_band(),
    );

    let first = session
        .analyze(Region::Usd, analysis_date(), false)
        .await
        .expect("first run");
    assert_eq!(first.freshness, Freshness::Live);

    // Delete the feed file: the second run must not need it.
    std::fs::remove_file(&feed_path).ok();

    let second = session
        .analyze(Region::Usd, analysis_date(), false)
        .await
        .expect("second run");
    assert_eq!(second.freshness, Freshness::Cached);
    assert_eq!(second.summary.bullish, first.summary.bullish);
    assert_eq!(second.summary.overall, first.summary.overall);
}

#[tokio::test]
async fn region_with_no_rows_anywhere_is_a_typed_failure() {
    let feed_path = write_feed("cli_e2e_nodata");
    let store = SqliteStore::open_in_memory().await.expect("open store");
    let mut session = AnalysisSession::new(
        JsonFeedSource::new(&feed_path),
        store,
        BiasPolicy::default_band(),
    );

    // The feed only carries United States rows.
    let err = session
        .analyze(Region::Eur, analysis_date(), false)
        .await
        .expect_err("no EUR data anywhere");
    std::fs::remove_file(&feed_path).ok();

    assert!(matches!(err, SessionError::NoData { .. }));
    assert!(err.to_string().contains("EUR"));
    assert_eq!(session.state(), SessionState::FetchFailed);
}
