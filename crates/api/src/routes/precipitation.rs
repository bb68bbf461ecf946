//! Precipitation Routes

use axum::{extract::State, Json};
use std::collections::BTreeMap;
use std::sync::Arc;
use storage::PrecipitationReading;

use crate::{error::ApiError, AppState};

/// Date to precipitation mapping. Keys are unique, so rows sharing a date
/// (different stations) collapse to the last one the store returned.
pub type PrecipitationByDate = BTreeMap<String, Option<f64>>;

/// Get precipitation for the trailing 12 months
pub async fn get_precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PrecipitationByDate>, ApiError> {
    let rows = state
        .repository
        .precipitation_since(&state.window.since)
        .await?;

    Ok(Json(collapse_by_date(rows)))
}

/// Key readings by date; a later reading replaces an earlier one
pub fn collapse_by_date(rows: Vec<PrecipitationReading>) -> PrecipitationByDate {
    rows.into_iter()
        .map(|r| (r.date, r.precipitation))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(date: &str, precipitation: Option<f64>) -> PrecipitationReading {
        PrecipitationReading {
            date: date.to_string(),
            precipitation,
        }
    }

    #[test]
    fn test_last_duplicate_wins() {
        let map = collapse_by_date(vec![
            reading("2016-08-23", Some(0.0)),
            reading("2016-08-24", Some(0.08)),
            reading("2016-08-23", Some(1.79)),
            reading("2016-08-24", None),
        ]);

        assert_eq!(map.len(), 2);
        assert_eq!(map["2016-08-23"], Some(1.79));
        assert_eq!(map["2016-08-24"], None);
    }

    #[test]
    fn test_serializes_as_object() {
        let map = collapse_by_date(vec![reading("2017-01-01", None), reading("2016-12-31", Some(0.5))]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"2016-12-31":0.5,"2017-01-01":null}"#);
    }
}
