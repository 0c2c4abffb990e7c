use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::observation::Observation;
use crate::region::Region;
use crate::snapshot::SnapshotRow;

#[async_trait]
pub trait IndicatorSource: Send + Sync {
    /// Fetches the observations a source can offer for one region on one
    /// date. Per-indicator problems degrade to fewer observations; an
    /// error means the source as a whole could not be used.
    async fn fetch_observations(&self, region: Region, date: NaiveDate)
        -> Result<Vec<Observation>>;

    fn name(&self) -> &str;
}

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// All rows stored for a region on an exact date.
    async fn rows_for(&self, region: Region, date: NaiveDate) -> Result<Vec<SnapshotRow>>;

    /// Inserts rows, replacing any existing row with the same
    /// `(date, currency, indicator)` key.
    async fn upsert_batch(&self, rows: &[SnapshotRow]) -> Result<()>;

    /// The most recent stored date strictly before `date` for a region.
    async fn latest_date_before(&self, region: Region, date: NaiveDate)
        -> Result<Option<NaiveDate>>;

    /// Rows for a region across an inclusive date range, newest first.
    async fn history(&self, region: Region, from: NaiveDate, to: NaiveDate)
        -> Result<Vec<SnapshotRow>>;
}
