//! Store connection lifecycle: driver seams, errors, and the manager that owns
//! the single live connection of the process.
//!
//! The manager is driver-agnostic. A [`Connector`] opens a [`StoreClient`],
//! the client hands out [`Database`] handles scoped to a logical database
//! name. [`mongo::MongoConnector`] is the production driver.

pub mod manager;
pub mod mongo;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use manager::{ConnectionManager, ConnectionStatus};
pub use mongo::MongoConnector;

/// Boxed driver error carried as the source of a [`StoreError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Shared handle to one logical database. Clones point at the same handle.
pub type DatabaseHandle = Arc<dyn Database>;

/// Opens connections to the external store.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Open a new connection and verify it with a round trip.
    async fn open(&self, uri: &str) -> Result<Box<dyn StoreClient>, BoxError>;
}

/// An open connection to the store.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Derive a handle scoped to the named logical database.
    fn database(&self, name: &str) -> DatabaseHandle;

    /// Release the connection.
    async fn close(&self) -> Result<(), BoxError>;
}

/// A handle scoped to one logical database.
#[async_trait]
pub trait Database: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Liveness round trip against the store.
    async fn ping(&self) -> Result<(), BoxError>;
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to connect to {uri}: {source}")]
    Connection {
        uri: String,
        #[source]
        source: BoxError,
    },
    #[error("Database not connected. Call connect first.")]
    NotConnected,
    #[error("failed to close connection: {0}")]
    Close(#[source] BoxError),
    #[error("{0}")]
    Ping(#[source] BoxError),
}

impl StoreError {
    pub fn connection(uri: &str, source: BoxError) -> Self {
        Self::Connection {
            uri: redact_uri(uri),
            source,
        }
    }
}

/// Mask the password component of a connection URI for logs and errors.
pub fn redact_uri(uri: &str) -> String {
    let Some(scheme_end) = uri.find("://") else {
        return uri.to_string();
    };
    let rest = &uri[scheme_end + 3..];
    let Some(at) = rest.rfind('@') else {
        return uri.to_string();
    };
    let userinfo = &rest[..at];
    match userinfo.find(':') {
        Some(colon) => format!(
            "{}{}:***{}",
            &uri[..scheme_end + 3],
            &userinfo[..colon],
            &rest[at..]
        ),
        None => uri.to_string(),
    }
}
