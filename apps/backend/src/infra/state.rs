use std::sync::Arc;

use crate::config::store::StoreConfig;
use crate::error::AppError;
use crate::infra::store::{ConnectionManager, Connector, MongoConnector};
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main).
///
/// Defaults to the MongoDB driver and `StoreConfig::from_env()`. The store is
/// only contacted during `build()` when `connected()` was requested.
pub struct StateBuilder {
    connector: Option<Box<dyn Connector>>,
    store_config: Option<StoreConfig>,
    connect: bool,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            connector: None,
            store_config: None,
            connect: false,
        }
    }

    pub fn with_connector<C: Connector>(mut self, connector: C) -> Self {
        self.connector = Some(Box::new(connector));
        self
    }

    pub fn with_store_config(mut self, config: StoreConfig) -> Self {
        self.store_config = Some(config);
        self
    }

    /// Perform the initial connect as part of `build()`.
    pub fn connected(mut self) -> Self {
        self.connect = true;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let connector = self
            .connector
            .unwrap_or_else(|| Box::new(MongoConnector::new()) as Box<dyn Connector>);
        let config = self.store_config.unwrap_or_else(StoreConfig::from_env);

        let manager = Arc::new(ConnectionManager::new(connector, config));
        if self.connect {
            manager.connect().await?;
        }

        Ok(AppState::new(manager))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
