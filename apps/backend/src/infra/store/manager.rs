use std::mem;

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{redact_uri, Connector, DatabaseHandle, StoreClient, StoreError};
use crate::config::store::StoreConfig;

/// Observable lifecycle state of a [`ConnectionManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connected,
}

enum ConnectionState {
    Disconnected,
    Connected {
        client: Box<dyn StoreClient>,
        database: DatabaseHandle,
    },
}

impl ConnectionState {
    fn status(&self) -> ConnectionStatus {
        match self {
            ConnectionState::Disconnected => ConnectionStatus::Disconnected,
            ConnectionState::Connected { .. } => ConnectionStatus::Connected,
        }
    }
}

/// Owns at most one live store connection and the database handle derived
/// from it.
///
/// `connect` and `close` are serialized by an async mutex held across the
/// network handshake, so concurrent first-time connects open exactly one
/// connection. `get_handle` only takes the state read lock and never waits
/// on a pending transition.
pub struct ConnectionManager {
    connector: Box<dyn Connector>,
    config: StoreConfig,
    state: RwLock<ConnectionState>,
    transition: Mutex<()>,
}

impl ConnectionManager {
    pub fn new(connector: Box<dyn Connector>, config: StoreConfig) -> Self {
        Self {
            connector,
            config,
            state: RwLock::new(ConnectionState::Disconnected),
            transition: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn status(&self) -> ConnectionStatus {
        self.state.read().status()
    }

    pub fn is_connected(&self) -> bool {
        self.status() == ConnectionStatus::Connected
    }

    /// Connect to the configured store, or return the existing handle.
    ///
    /// On failure the manager stays disconnected and the error carries the
    /// driver's cause. No retry is attempted.
    pub async fn connect(&self) -> Result<DatabaseHandle, StoreError> {
        if let Some(database) = self.current() {
            debug!(database = %database.name(), "store_connect=reuse");
            return Ok(database);
        }

        let _guard = self.transition.lock().await;

        // Another caller may have finished connecting while we waited.
        if let Some(database) = self.current() {
            debug!(database = %database.name(), "store_connect=reuse");
            return Ok(database);
        }

        let uri = &self.config.uri;
        info!(
            uri = %redact_uri(uri),
            database = %self.config.database_name,
            "store_connect=start"
        );

        let client = match self.connector.open(uri).await {
            Ok(client) => client,
            Err(source) => {
                let err = StoreError::connection(uri, source);
                warn!(error = %err, "store_connect=failed");
                return Err(err);
            }
        };

        let database = client.database(&self.config.database_name);
        *self.state.write() = ConnectionState::Connected {
            client,
            database: database.clone(),
        };

        info!(database = %database.name(), "store_connect=ok");
        Ok(database)
    }

    /// Current database handle. Fails with [`StoreError::NotConnected`]
    /// unless a connect has succeeded since the last close.
    pub fn get_handle(&self) -> Result<DatabaseHandle, StoreError> {
        self.current().ok_or(StoreError::NotConnected)
    }

    /// Release the connection. A no-op when already disconnected.
    ///
    /// Stored handles are cleared even when the driver reports a close
    /// failure; that failure is returned afterwards.
    pub async fn close(&self) -> Result<(), StoreError> {
        let _guard = self.transition.lock().await;

        let previous = mem::replace(&mut *self.state.write(), ConnectionState::Disconnected);
        let ConnectionState::Connected { client, database } = previous else {
            debug!("store_close=noop");
            return Ok(());
        };

        let result = client.close().await.map_err(StoreError::Close);
        match &result {
            Ok(()) => info!(database = %database.name(), "store_close=ok"),
            Err(e) => warn!(database = %database.name(), error = %e, "store_close=failed"),
        }
        result
    }

    fn current(&self) -> Option<DatabaseHandle> {
        match &*self.state.read() {
            ConnectionState::Connected { database, .. } => Some(database.clone()),
            ConnectionState::Disconnected => None,
        }
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("uri", &redact_uri(&self.config.uri))
            .field("database_name", &self.config.database_name)
            .field("status", &self.status())
            .finish()
    }
}
