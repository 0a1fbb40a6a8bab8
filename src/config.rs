use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

pub const DEFAULT_SESSION_KEY: &str = "campus_graph.session.user";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub session: SessionConfig,
    pub cache: CacheConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub dir: PathBuf,
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Number of per-field facet lists kept by each entity store.
    pub facet_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub fixtures_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session: SessionConfig {
                dir: PathBuf::from("data/session"),
                key: DEFAULT_SESSION_KEY.to_string(),
            },
            cache: CacheConfig { facet_capacity: 16 },
            data: DataConfig { fixtures_path: None },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        let facet_capacity = env::var("FACET_CACHE_CAPACITY")
            .unwrap_or_else(|_| defaults.cache.facet_capacity.to_string())
            .parse()
            .unwrap_or(defaults.cache.facet_capacity);
        if facet_capacity == 0 {
            return Err(AppError::ConfigurationError(
                "FACET_CACHE_CAPACITY must be at least 1".to_string(),
            ));
        }

        let key = env::var("SESSION_KEY").unwrap_or(defaults.session.key);
        if key.trim().is_empty() {
            return Err(AppError::ConfigurationError(
                "SESSION_KEY cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            session: SessionConfig {
                dir: env::var("SESSION_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.session.dir),
                key,
            },
            cache: CacheConfig { facet_capacity },
            data: DataConfig {
                fixtures_path: env::var("FIXTURES_PATH").ok().map(PathBuf::from),
            },
            logging: LoggingConfig {
                level: env::var("LOG_LEVEL").unwrap_or(defaults.logging.level),
            },
        })
    }
}
