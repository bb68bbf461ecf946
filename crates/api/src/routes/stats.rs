//! Temperature Statistics Routes
//!
//! Path segments are handed to the store as-is. Dates are compared as text,
//! so only zero padded `YYYY-MM-DD` values give chronological results; other
//! input yields an empty window rather than an error.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use storage::TemperatureStats;

use crate::{error::ApiError, AppState};

/// Aggregate entry as rendered to clients. Both stats routes use the
/// `_start` suffix.
#[derive(Debug, Serialize, PartialEq)]
pub struct StatsEntry {
    pub min_start: Option<f64>,
    pub avg_start: Option<f64>,
    pub max_start: Option<f64>,
}

impl From<TemperatureStats> for StatsEntry {
    fn from(s: TemperatureStats) -> Self {
        Self {
            min_start: s.min,
            avg_start: s.avg,
            max_start: s.max,
        }
    }
}

/// Stats for every observation on or after `start`
pub async fn get_stats_from(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<Vec<StatsEntry>>, ApiError> {
    let stats = state.repository.temperature_stats(&start, None).await?;
    Ok(Json(vec![stats.into()]))
}

/// Stats for observations in `[start, end]`
pub async fn get_stats_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<StatsEntry>>, ApiError> {
    let stats = state
        .repository
        .temperature_stats(&start, Some(&end))
        .await?;
    Ok(Json(vec![stats.into()]))
}
