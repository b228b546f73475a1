use std::env;

use thiserror::Error;

use crate::realtime::DEFAULT_FEED_CAPACITY;

pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown store backend '{0}' (expected 'memory' or 'sqlite')")]
    UnknownBackend(String),
    #[error("Environment variable '{name}' has invalid value '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Which store implementation backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    /// Any URL sea-orm accepts; `sqlite:` and `postgres:` are compiled in.
    Sql { database_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub feed_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            feed_capacity: DEFAULT_FEED_CAPACITY,
        }
    }
}

impl StoreConfig {
    pub fn memory() -> Self {
        Self::default()
    }

    pub fn sql(database_url: impl Into<String>) -> Self {
        Self {
            backend: StoreBackend::Sql {
                database_url: database_url.into(),
            },
            ..Self::default()
        }
    }

    /// Read `C4_STORE`, `C4_DATABASE_URL` and `C4_FEED_CAPACITY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup("C4_STORE").as_deref().map(str::trim) {
            None | Some("") | Some("memory") => StoreBackend::Memory,
            Some("sqlite") | Some("sql") => StoreBackend::Sql {
                database_url: lookup("C4_DATABASE_URL")
                    .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            },
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        let feed_capacity = match lookup("C4_FEED_CAPACITY") {
            None => DEFAULT_FEED_CAPACITY,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "C4_FEED_CAPACITY",
                        value: raw,
                    })
                }
            },
        };

        Ok(Self {
            backend,
            feed_capacity,
        })
    }
}
