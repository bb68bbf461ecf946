//! Station Routes

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use storage::StationSummary;

use crate::{error::ApiError, AppState};

/// Station entry as rendered to clients
#[derive(Debug, Serialize)]
pub struct StationEntry {
    #[serde(rename = "Station ID")]
    pub station_id: String,
    #[serde(rename = "Name")]
    pub name: String,
}

impl From<StationSummary> for StationEntry {
    fn from(s: StationSummary) -> Self {
        Self {
            station_id: s.station_id,
            name: s.name,
        }
    }
}

/// List every station
pub async fn get_stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StationEntry>>, ApiError> {
    let stations = state.repository.all_stations().await?;
    Ok(Json(stations.into_iter().map(StationEntry::from).collect()))
}
