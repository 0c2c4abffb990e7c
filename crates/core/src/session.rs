//! The analysis session: one fetch-score-persist sequence per request.
//!
//! The session owns the snapshot cache protocol. For a request on date D:
//! stored rows for D win outright (unless a refresh is forced); otherwise
//! a live fetch is scored and persisted; an empty fetch falls back to the
//! most recent stored date strictly before D, surfaced as stale; and when
//! nothing exists at all the session fails with a typed no-data error
//! rather than inventing an empty report.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::aggregate::{aggregate, BiasPolicy, Summary};
use crate::evaluate::evaluate_all;
use crate::region::Region;
use crate::snapshot::SnapshotRow;
use crate::traits::{IndicatorSource, SnapshotStore};
use crate::verdict::{SkippedRow, Verdict};

/// Where a report's rows came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Freshness {
    /// Scored from a live fetch during this request.
    Live,
    /// Served from rows already stored for the requested date.
    Cached,
    /// Fallback to the most recent prior date; `as_of` says which.
    Stale { as_of: NaiveDate },
}

/// Lifecycle of one request. Every request starts a fresh cycle; there is
/// no resumption of a failed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Fetching,
    Scored,
    FetchFailed,
}

/// Errors that end a request without a report.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The live fetch produced nothing scoreable and the store holds no
    /// history for the region.
    #[error("no data available for {region}: live fetch was empty and no stored snapshots exist")]
    NoData { region: Region },
    #[error("indicator source failed")]
    Source(#[source] anyhow::Error),
    #[error("snapshot store failed")]
    Store(#[source] anyhow::Error),
}

/// Everything a presentation layer needs for one region and date.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub region: Region,
    /// The date the user asked for.
    pub requested: NaiveDate,
    /// The date the rows actually describe; differs from `requested`
    /// only on the stale path.
    pub as_of: NaiveDate,
    pub freshness: Freshness,
    pub verdicts: Vec<Verdict>,
    pub skipped: Vec<SkippedRow>,
    pub summary: Summary,
}

impl AnalysisReport {
    /// One explanation line per verdict, in verdict order.
    #[must_use]
    pub fn explanations(&self) -> Vec<String> {
        self.verdicts.iter().map(Verdict::explanation).collect()
    }
}

/// Drives one request at a time through fetch, scoring, aggregation, and
/// persistence. Strictly sequential; no concurrent fetches, no retries.
pub struct AnalysisSession<S, R>
where
    S: IndicatorSource,
    R: SnapshotStore,
{
    source: S,
    store: R,
    policy: BiasPolicy,
    state: SessionState,
}

impl<S, R> AnalysisSession<S, R>
where
    S: IndicatorSource,
    R: SnapshotStore,
{
    pub fn new(source: S, store: R, policy: BiasPolicy) -> Self {
        Self {
            source,
            store,
            policy,
            state: SessionState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Runs one full request for a region and date.
    ///
    /// `force_refresh` bypasses the same-day cache check; the fetched
    /// rows still upsert over the stored ones.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoData`] when neither the live fetch nor the store
    /// can produce any rows; [`SessionError::Source`] and
    /// [`SessionError::Store`] wrap infrastructure failures.
    pub async fn analyze(
        &mut self,
        region: Region,
        date: NaiveDate,
        force_refresh: bool,
    ) -> Result<AnalysisReport, SessionError> {
        self.state = SessionState::Fetching;
        match self.run(region, date, force_refresh).await {
            Ok(report) => {
                self.state = SessionState::Scored;
                Ok(report)
            }
            Err(e) => {
                self.state = SessionState::FetchFailed;
                Err(e)
            }
        }
    }

    async fn run(
        &mut self,
        region: Region,
        date: NaiveDate,
        force_refresh: bool,
    ) -> Result<AnalysisReport, SessionError> {
        if !force_refresh {
            let cached = self
                .store
                .rows_for(region, date)
                .await
                .map_err(SessionError::Store)?;
            if !cached.is_empty() {
                debug!(%region, %date, rows = cached.len(), "serving stored snapshot");
                let verdicts = rows_to_verdicts(cached)?;
                return Ok(self.report(region, date, date, Freshness::Cached, verdicts, Vec::new()));
            }
        }

        let observations = self
            .source
            .fetch_observations(region, date)
            .await
            .map_err(SessionError::Source)?;

        let (verdicts, skipped) = evaluate_all(&observations);

        if !verdicts.is_empty() {
            let rows: Vec<SnapshotRow> = verdicts
                .iter()
                .map(|v| SnapshotRow::from_verdict(region, date, v))
                .collect();
            self.store
                .upsert_batch(&rows)
                .await
                .map_err(SessionError::Store)?;
            info!(
                %region,
                %date,
                scored = verdicts.len(),
                skipped = skipped.len(),
                source = self.source.name(),
                "scored live snapshot"
            );
            return Ok(self.report(region, date, date, Freshness::Live, verdicts, skipped));
        }

        warn!(
            %region,
            %date,
            skipped = skipped.len(),
            source = self.source.name(),
            "live fetch scored nothing, falling back to stored history"
        );

        if let Some(prior) = self
            .store
            .latest_date_before(region, date)
            .await
            .map_err(SessionError::Store)?
        {
            let rows = self
                .store
                .rows_for(region, prior)
                .await
                .map_err(SessionError::Store)?;
            if !rows.is_empty() {
                info!(%region, %date, as_of = %prior, "serving stale snapshot");
                let verdicts = rows_to_verdicts(rows)?;
                // The live attempt's skip rows stay on the report; they
                // explain why fresh data was unavailable.
                return Ok(self.report(
                    region,
                    date,
                    prior,
                    Freshness::Stale { as_of: prior },
                    verdicts,
                    skipped,
                ));
            }
        }

        Err(SessionError::NoData { region })
    }

    fn report(
        &self,
        region: Region,
        requested: NaiveDate,
        as_of: NaiveDate,
        freshness: Freshness,
        verdicts: Vec<Verdict>,
        skipped: Vec<SkippedRow>,
    ) -> AnalysisReport {
        let summary = aggregate(&verdicts, skipped.len(), self.policy);
        AnalysisReport {
            region,
            requested,
            as_of,
            freshness,
            verdicts,
            skipped,
            summary,
        }
    }
}

fn rows_to_verdicts(rows: Vec<SnapshotRow>) -> Result<Vec<Verdict>, SessionError> {
    rows.iter()
        .map(SnapshotRow::to_verdict)
        .collect::<anyhow::Result<Vec<_>>>()
        .map_err(SessionError::Store)
}
