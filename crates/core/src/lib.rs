pub mod aggregate;
pub mod config;
pub mod config_loader;
pub mod evaluate;
pub mod indicator;
pub mod numeric;
pub mod observation;
pub mod region;
pub mod report;
pub mod session;
pub mod snapshot;
pub mod traits;
pub mod verdict;

pub use aggregate::{aggregate, BiasPolicy, Summary};
pub use config::{AnalysisConfig, AppConfig, CalendarConfig, DatabaseConfig, WorldBankConfig};
pub use config_loader::ConfigLoader;
pub use evaluate::{evaluate, evaluate_all};
pub use indicator::{
    classify_polarity, rationale_for, spec_by_code, spec_by_name, IndicatorSpec, Polarity,
    WORLD_BANK_INDICATORS,
};
pub use numeric::{format_value, parse_numeric, round2};
pub use observation::{Baseline, Observation};
pub use region::Region;
pub use report::ReportFormatter;
pub use session::{
    AnalysisReport, AnalysisSession, Freshness, SessionError, SessionState,
};
pub use snapshot::SnapshotRow;
pub use traits::{IndicatorSource, SnapshotStore};
pub use verdict::{Bias, EvalOutcome, SkipReason, SkippedRow, Verdict};
