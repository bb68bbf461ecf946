//! Service configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional file
//! (`climate-api.toml` next to the working directory, or the path in
//! `CLIMATE_API_CONFIG`), then `CLIMATE_API__SECTION__KEY` environment
//! variables.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "CLIMATE_API_CONFIG";

const DEFAULT_CONFIG_NAME: &str = "climate-api";
const ENV_PREFIX: &str = "CLIMATE_API";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub query: QuerySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Pre-populated SQLite file, opened read-only
    pub path: String,
}

/// Fixed filters used by the precipitation and tobs routes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuerySettings {
    /// Inclusive lower date bound, `YYYY-MM-DD`
    pub since: String,
    /// Station served by `/api/v1.0/tobs`
    pub station: String,
    /// Compute `since` (latest date minus 12 months) and `station` (most
    /// observations) from the store at startup instead of using the values above
    pub derive_from_store: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive; `RUST_LOG` wins when set
    pub level: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Settings {
    /// Load from defaults, the config file and the environment
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load_from(Some(Path::new(&path))),
            Err(_) => Self::load_from(None),
        }
    }

    /// Load with an explicit file. A missing explicit file is an error; the
    /// default file name is optional.
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(file, Environment::with_prefix(ENV_PREFIX).separator("__"))
    }

    fn load_with_env(file: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.path", "Resources/Hawaii.sqlite")?
            .set_default("query.since", "2016-08-23")?
            .set_default("query.station", "USC00519281")?
            .set_default("query.derive_from_store", false)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .add_source(file_source)
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    /// `host:port` to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
