//! Temperature Observation Routes

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use storage::TemperatureReading;

use crate::{error::ApiError, AppState};

/// Temperature entry as rendered to clients
#[derive(Debug, Serialize)]
pub struct TemperatureEntry {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Temperature")]
    pub temperature: Option<f64>,
}

impl From<TemperatureReading> for TemperatureEntry {
    fn from(r: TemperatureReading) -> Self {
        Self {
            date: r.date,
            temperature: r.temperature,
        }
    }
}

/// Get the last 12 months of temperatures at the most active station
pub async fn get_tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureEntry>>, ApiError> {
    let rows = state
        .repository
        .temperatures_for_station(&state.window.station, &state.window.since)
        .await?;

    Ok(Json(rows.into_iter().map(TemperatureEntry::from).collect()))
}
