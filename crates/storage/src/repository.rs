//! Repository Implementation

use crate::models::{PrecipitationReading, StationSummary, TemperatureReading, TemperatureStats};
use crate::StorageError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Tables every query below reads from
const REQUIRED_TABLES: [&str; 2] = ["measurement", "station"];

/// Read-only access to the observation store.
///
/// Cloning is cheap; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Open an existing SQLite file read-only.
    ///
    /// Fails with [`StorageError::Connection`] when the file cannot be opened and
    /// with [`StorageError::MissingTable`] when it does not hold the observation
    /// schema. The file is never created.
    pub async fn connect(db_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        if !db_path.is_file() {
            return Err(StorageError::Connection(format!(
                "database file not found: {}",
                db_path.display()
            )));
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .read_only(true)
            .create_if_missing(false)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let repo = Self { pool };
        repo.verify_schema().await?;

        info!("Opened observation store (read-only): {}", db_path.display());
        Ok(repo)
    }

    /// Wrap an already configured pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check that both tables the API reads exist
    pub async fn verify_schema(&self) -> Result<(), StorageError> {
        for table in REQUIRED_TABLES {
            let found: Option<i64> = sqlx::query_scalar(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1",
            )
            .bind(table)
            .fetch_optional(&self.pool)
            .await?;

            if found.is_none() {
                return Err(StorageError::MissingTable(table));
            }
        }
        Ok(())
    }

    /// Date and precipitation of every observation on or after `since`.
    /// Row order is whatever the store returns.
    pub async fn precipitation_since(
        &self,
        since: &str,
    ) -> Result<Vec<PrecipitationReading>, StorageError> {
        let rows = sqlx::query_as::<_, PrecipitationReading>(
            "SELECT date, prcp AS precipitation FROM measurement WHERE date >= ?1",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        debug!("precipitation since {}: {} rows", since, rows.len());
        Ok(rows)
    }

    /// Id and name of every station
    pub async fn all_stations(&self) -> Result<Vec<StationSummary>, StorageError> {
        let rows = sqlx::query_as::<_, StationSummary>(
            "SELECT station AS station_id, name FROM station",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!("stations: {} rows", rows.len());
        Ok(rows)
    }

    /// Temperature readings of one station on or after `since`
    pub async fn temperatures_for_station(
        &self,
        station_id: &str,
        since: &str,
    ) -> Result<Vec<TemperatureReading>, StorageError> {
        let rows = sqlx::query_as::<_, TemperatureReading>(
            "SELECT date, tobs AS temperature FROM measurement \
             WHERE station = ?1 AND date >= ?2",
        )
        .bind(station_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        debug!(
            "temperatures for {} since {}: {} rows",
            station_id,
            since,
            rows.len()
        );
        Ok(rows)
    }

    /// Min, average and max temperature for `start <= date` and, when given,
    /// `date <= end`. Always yields one row; fields are `None` when nothing
    /// matches.
    pub async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureStats, StorageError> {
        let stats = sqlx::query_as::<_, TemperatureStats>(
            "SELECT CAST(MIN(tobs) AS REAL) AS min, \
                    AVG(tobs) AS avg, \
                    CAST(MAX(tobs) AS REAL) AS max \
             FROM measurement \
             WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2)",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        debug!("temperature stats {}..{:?}: {:?}", start, end, stats);
        Ok(stats)
    }

    /// Most recent observation date, if any observation exists
    pub async fn latest_observation_date(&self) -> Result<Option<String>, StorageError> {
        let latest: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;
        Ok(latest)
    }

    /// Station with the most observation rows; ties go to the lowest id
    pub async fn most_active_station(&self) -> Result<Option<String>, StorageError> {
        let station: Option<String> = sqlx::query_scalar(
            "SELECT station FROM measurement \
             GROUP BY station \
             ORDER BY COUNT(*) DESC, station ASC \
             LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(station)
    }

    /// Total observation rows
    pub async fn observation_count(&self) -> Result<i64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM measurement")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Total station rows
    pub async fn station_count(&self) -> Result<i64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM station")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
