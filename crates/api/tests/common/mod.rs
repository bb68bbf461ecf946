//! Shared fixtures for API tests

#![allow(dead_code)]

use api::{create_router, AppState, QueryWindow};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use storage::{Observation, Repository, Station};
use tower::util::ServiceExt;

pub use storage::testing::{memory_pool, obs, station};

pub const MOST_ACTIVE: &str = "USC00519281";
pub const YEAR_START: &str = "2016-08-23";

/// Small slice of the Hawaii dataset
pub fn hawaii_observations() -> Vec<Observation> {
    vec![
        obs("USC00519397", "2016-08-22", Some(0.4), Some(76.0)),
        obs("USC00519397", "2016-08-23", Some(0.0), Some(81.0)),
        obs(MOST_ACTIVE, "2016-08-23", Some(1.79), Some(77.0)),
        obs("USC00513117", "2016-08-24", None, Some(76.0)),
        obs(MOST_ACTIVE, "2016-08-24", Some(2.15), Some(77.0)),
        obs(MOST_ACTIVE, "2017-08-22", Some(0.5), Some(76.0)),
        obs(MOST_ACTIVE, "2017-08-23", Some(0.0), Some(79.0)),
    ]
}

pub fn hawaii_stations() -> Vec<Station> {
    vec![
        station("USC00519397", "WAIKIKI 717.2, HI US"),
        station("USC00513117", "KANEOHE 838.1, HI US"),
        station(MOST_ACTIVE, "WAIHEE 837.5, HI US"),
    ]
}

/// Router over the given rows with the fixed 2016-08-23 / USC00519281 window
pub async fn create_test_router(observations: &[Observation], stations: &[Station]) -> Router {
    let repository = Repository::from_pool(memory_pool(observations, stations).await);
    router_for(repository)
}

pub fn router_for(repository: Repository) -> Router {
    let window = QueryWindow {
        since: YEAR_START.to_string(),
        station: MOST_ACTIVE.to_string(),
    };
    create_router(Arc::new(AppState::new(repository, window)))
}

/// GET `uri`, returning status and raw body
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// GET `uri` and parse the body as JSON
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    let value = serde_json::from_str(&body).unwrap_or(Value::Null);
    (status, value)
}
