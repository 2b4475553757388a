//! MongoDB driver for the connection manager.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::Client;
use tracing::debug;

use super::{BoxError, Connector, Database, DatabaseHandle, StoreClient};

/// Connects with the official `mongodb` driver.
///
/// The driver connects lazily, so `open` pings the `admin` database before
/// returning; an unreachable server fails here rather than on first use.
#[derive(Debug, Clone, Default)]
pub struct MongoConnector;

impl MongoConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connector for MongoConnector {
    async fn open(&self, uri: &str) -> Result<Box<dyn StoreClient>, BoxError> {
        let client = Client::with_uri_str(uri).await?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        debug!("mongodb ping ok");

        Ok(Box::new(MongoClient { client }))
    }
}

struct MongoClient {
    client: Client,
}

#[async_trait]
impl StoreClient for MongoClient {
    fn database(&self, name: &str) -> DatabaseHandle {
        Arc::new(MongoDatabase {
            name: name.to_string(),
            client: self.client.clone(),
        })
    }

    async fn close(&self) -> Result<(), BoxError> {
        self.client.clone().shutdown().await;
        Ok(())
    }
}

/// Named database on a shared driver client. The client is reference
/// counted by the driver, so handles are cheap.
#[derive(Debug)]
struct MongoDatabase {
    name: String,
    client: Client,
}

#[async_trait]
impl Database for MongoDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    async fn ping(&self) -> Result<(), BoxError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
