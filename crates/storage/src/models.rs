//! Record types read from the store

use serde::{Deserialize, Serialize};

/// A single day's reading at one station (`measurement` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Observation {
    #[sqlx(rename = "station")]
    pub station_id: String,
    /// `YYYY-MM-DD`; compared lexically by the store
    pub date: String,
    #[sqlx(rename = "prcp")]
    pub precipitation: Option<f64>,
    #[sqlx(rename = "tobs")]
    pub temperature: Option<f64>,
}

/// Weather station metadata (`station` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Station {
    #[sqlx(rename = "station")]
    pub station_id: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

/// Date and precipitation pair
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PrecipitationReading {
    pub date: String,
    pub precipitation: Option<f64>,
}

/// Station id and display name
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct StationSummary {
    pub station_id: String,
    pub name: String,
}

/// Date and observed temperature pair
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TemperatureReading {
    pub date: String,
    pub temperature: Option<f64>,
}

/// Aggregate temperature over a date window. All fields are `None` when no
/// observation falls inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Default, sqlx::FromRow)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

impl TemperatureStats {
    /// True when the window matched no temperature readings
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.avg.is_none() && self.max.is_none()
    }
}
