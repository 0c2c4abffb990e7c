//! SQLite-backed snapshot store.
//!
//! One table, `snapshots`, keyed by `(date, currency, indicator)`.
//! Writes are upserts so re-running an analysis for a date refreshes the
//! stored rows instead of duplicating them. Nothing is ever deleted;
//! history accumulates until a retention policy exists.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use fx_bias_core::{Region, SnapshotRow, SnapshotStore};

/// Row shape as it comes off the wire from SQLite.
#[derive(Debug, Clone, sqlx::FromRow)]
struct SnapshotRecord {
    date: NaiveDate,
    currency: String,
    indicator: String,
    actual: f64,
    forecast: Option<f64>,
    previous: Option<f64>,
    surprise: f64,
    bias: String,
}

impl TryFrom<SnapshotRecord> for SnapshotRow {
    type Error = anyhow::Error;

    fn try_from(record: SnapshotRecord) -> Result<Self> {
        let bias = record
            .bias
            .parse()
            .with_context(|| format!("bad bias label in stored row: '{}'", record.bias))?;
        Ok(SnapshotRow {
            date: record.date,
            currency: record.currency,
            indicator: record.indicator,
            actual: record.actual,
            forecast: record.forecast,
            previous: record.previous,
            surprise: record.surprise,
            bias,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (or creates) the snapshot database at the given file path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the schema
    /// cannot be created.
    pub async fn open(path: &str) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open snapshot database at {path}"))?;
        let store = Self { pool };
        store.init_schema().await?;
        debug!(path, "snapshot store ready");
        Ok(store)
    }

    /// Opens a fresh in-memory store. The pool is pinned to a single
    /// connection because each SQLite in-memory connection is its own
    /// database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new().in_memory(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS snapshots (
                date      TEXT NOT NULL,
                currency  TEXT NOT NULL,
                indicator TEXT NOT NULL,
                actual    REAL NOT NULL,
                forecast  REAL,
                previous  REAL,
                surprise  REAL NOT NULL,
                bias      TEXT NOT NULL,
                PRIMARY KEY (date, currency, indicator)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_snapshots_currency_date
            ON snapshots (currency, date)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for SqliteStore {
    async fn rows_for(&self, region: Region, date: NaiveDate) -> Result<Vec<SnapshotRow>> {
        let records = sqlx::query_as::<_, SnapshotRecord>(
            r#"
            SELECT date, currency, indicator, actual, forecast, previous, surprise, bias
            FROM snapshots
            WHERE currency = ? AND date = ?
            ORDER BY indicator ASC
            "#,
        )
        .bind(region.currency())
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        records.into_iter().map(SnapshotRow::try_from).collect()
    }

    async fn upsert_batch(&self, rows: &[SnapshotRow]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO snapshots
                    (date, currency, indicator, actual, forecast, previous, surprise, bias)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT (date, currency, indicator) DO UPDATE SET
                    actual = excluded.actual,
                    forecast = excluded.forecast,
                    previous = excluded.previous,
                    surprise = excluded.surprise,
                    bias = excluded.bias
                "#,
            )
            .bind(row.date)
            .bind(&row.currency)
            .bind(&row.indicator)
            .bind(row.actual)
            .bind(row.forecast)
            .bind(row.previous)
            .bind(row.surprise)
            .bind(row.bias.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn latest_date_before(
        &self,
        region: Region,
        date: NaiveDate,
    ) -> Result<Option<NaiveDate>> {
        let latest: Option<NaiveDate> = sqlx::query_scalar(
            r#"
            SELECT MAX(date)
            FROM snapshots
            WHERE currency = ? AND date < ?
            "#,
        )
        .bind(region.currency())
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(latest)
    }

    async fn history(
        &self,
        region: Region,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SnapshotRow>> {
        let records = sqlx::query_as::<_, SnapshotRecord>(
            r#"
            SELECT date, currency, indicator, actual, forecast, previous, surprise, bias
            FROM snapshots
            WHERE currency = ? AND date >= ? AND date <= ?
            ORDER BY date DESC, indicator ASC
            "#,
        )
        .bind(region.currency())
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        records.into_iter().map(SnapshotRow::try_from).collect()
    }
}
