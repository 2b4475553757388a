//! Runtime configuration read from environment-style key/value lookups.

pub mod server;
pub mod store;

use std::env;

use crate::error::AppError;
pub use server::ServerConfig;
pub use store::StoreConfig;

/// Full process configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            server: ServerConfig::from_lookup(&lookup)?,
            store: StoreConfig::from_lookup(&lookup),
        })
    }
}

/// Process environment lookup. Empty values count as unset.
pub fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
