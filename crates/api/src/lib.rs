//! Climate Observations API Server
//!
//! Read-only REST API over daily precipitation and temperature readings from
//! a set of weather stations.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use chrono::{Months, NaiveDate};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub mod error;
pub mod routes;
pub mod settings;

pub use error::{ApiError, ServerError};
pub use settings::Settings;

use settings::{LoggingSettings, QuerySettings};
use storage::{Repository, StorageError};

/// Routes listed on the landing page
pub const ROUTES: [&str; 5] = [
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/start",
    "/api/v1.0/start/end",
];

/// Fixed filters behind the precipitation and tobs routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWindow {
    /// Inclusive lower date bound
    pub since: String,
    /// Station for `/api/v1.0/tobs`
    pub station: String,
}

impl QueryWindow {
    /// Take the configured values, or derive them from the store when asked to.
    /// Falls back to the configured values when the store holds no usable data.
    pub async fn resolve(
        query: &QuerySettings,
        repository: &Repository,
    ) -> Result<Self, StorageError> {
        let configured = Self {
            since: query.since.clone(),
            station: query.station.clone(),
        };
        if !query.derive_from_store {
            return Ok(configured);
        }

        let since = match repository.latest_observation_date().await? {
            Some(latest) => one_year_before(&latest).unwrap_or_else(|| {
                warn!("Latest date {:?} is not YYYY-MM-DD, keeping {}", latest, query.since);
                configured.since.clone()
            }),
            None => {
                warn!("Store has no observations, keeping {}", query.since);
                configured.since.clone()
            }
        };
        let station = repository
            .most_active_station()
            .await?
            .unwrap_or(configured.station);

        info!("Derived query window: since {} at station {}", since, station);
        Ok(Self { since, station })
    }
}

/// `YYYY-MM-DD` twelve months before `date`
pub fn one_year_before(date: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    date.checked_sub_months(Months::new(12))
        .map(|d| d.format("%Y-%m-%d").to_string())
}

/// Application state shared across handlers
pub struct AppState {
    /// Read-only observation store
    pub repository: Repository,
    /// Fixed filters for the trailing-year routes
    pub window: QueryWindow,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(repository: Repository, window: QueryWindow) -> Self {
        Self {
            repository,
            window,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub observations: Option<i64>,
    pub stations: Option<i64>,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(welcome_handler))
        .route("/health", get(health_handler))
        .route(
            "/api/v1.0/precipitation",
            get(routes::precipitation::get_precipitation),
        )
        .route("/api/v1.0/stations", get(routes::stations::get_stations))
        .route("/api/v1.0/tobs", get(routes::tobs::get_tobs))
        .route("/api/v1.0/:start", get(routes::stats::get_stats_from))
        .route("/api/v1.0/:start/:end", get(routes::stats::get_stats_between))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Landing page listing the available routes
async fn welcome_handler() -> Html<String> {
    let mut body = String::from("Hawaii Climate API<br/>Available Routes:<br/>");
    for route in ROUTES {
        body.push_str(route);
        body.push_str("<br/>");
    }
    Html(body)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let counts = async {
        let observations = state.repository.observation_count().await?;
        let stations = state.repository.station_count().await?;
        Ok::<_, StorageError>((observations, stations))
    }
    .await;

    let (status, observations, stations) = match counts {
        Ok((o, s)) => (StatusCode::OK, Some(o), Some(s)),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, None, None)
        }
    };

    let response = HealthResponse {
        status: if status == StatusCode::OK {
            "healthy"
        } else {
            "unavailable"
        }
        .to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        observations,
        stations,
    };

    (status, Json(response))
}

/// Initialize logging. `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(settings: &LoggingSettings) -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| ServerError::Logging(format!("invalid logging.level: {}", e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if settings.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| ServerError::Logging(e.to_string()))
}

/// Run the server until Ctrl-C
pub async fn run_server(settings: Settings) -> Result<(), ServerError> {
    let repository = Repository::connect(&settings.database.path).await?;
    let window = QueryWindow::resolve(&settings.query, &repository).await?;

    let state = Arc::new(AppState::new(repository, window));
    let app = create_router(state);

    let addr = settings.bind_addr();
    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
