// Process configuration, read from the environment (after `.env` is loaded).
//
// | Env var                              | Default        |
// |--------------------------------------|----------------|
// | `QUIZ_BUILDER_ADDR`                  | `0.0.0.0:8080` |
// | `QUIZ_BUILDER_DATA_DIR`              | in memory      |
// | `QUIZ_BUILDER_SEED`                  | `true`         |
// | `QUIZ_BUILDER_STORAGE_QUOTA_BYTES`   | unlimited      |
// | `QUIZ_BUILDER_SESSION_IDLE_SECS`     | `3600`         |
// | `QUIZ_BUILDER_CORS_ORIGINS`          | no CORS layer  |

use axum::http::HeaderValue;
use chrono::TimeDelta;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_SESSION_IDLE_SECS: i64 = 3600;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has an invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    InMemory { quota_bytes: Option<usize> },
    Directory(PathBuf),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub storage: StorageConfig,
    pub seed: bool,
    pub session_idle_ttl: TimeDelta,
    pub cors_origins: Vec<HeaderValue>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the config from any variable source; unset and blank values take the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let addr = parse("QUIZ_BUILDER_ADDR", get("QUIZ_BUILDER_ADDR"))?
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)));

        let quota_bytes = parse("QUIZ_BUILDER_STORAGE_QUOTA_BYTES", get("QUIZ_BUILDER_STORAGE_QUOTA_BYTES"))?;
        let storage = match get("QUIZ_BUILDER_DATA_DIR") {
            Some(dir) => StorageConfig::Directory(PathBuf::from(dir)),
            None => StorageConfig::InMemory { quota_bytes },
        };

        let seed = parse("QUIZ_BUILDER_SEED", get("QUIZ_BUILDER_SEED"))?.unwrap_or(true);

        let idle_secs: i64 = parse("QUIZ_BUILDER_SESSION_IDLE_SECS", get("QUIZ_BUILDER_SESSION_IDLE_SECS"))?
            .unwrap_or(DEFAULT_SESSION_IDLE_SECS);
        let session_idle_ttl = TimeDelta::try_seconds(idle_secs)
            .filter(|ttl| *ttl > TimeDelta::zero())
            .ok_or_else(|| invalid("QUIZ_BUILDER_SESSION_IDLE_SECS", idle_secs.to_string(), "must be a positive number of seconds"))?;

        let cors_origins = get("QUIZ_BUILDER_CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|origin| {
                        HeaderValue::from_str(origin)
                            .map_err(|e| invalid("QUIZ_BUILDER_CORS_ORIGINS", origin.to_string(), e))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            addr,
            storage,
            seed,
            session_idle_ttl,
            cors_origins,
        })
    }
}

fn parse<T>(var: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|raw| raw.parse::<T>().map_err(|e| invalid(var, raw, e)))
        .transpose()
}

fn invalid(var: &'static str, value: String, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        var,
        value,
        reason: reason.to_string(),
    }
}
