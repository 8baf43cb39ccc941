//! Connection acquisition for repositories
//!
//! A repository holds a [`MongoConnector`] and brackets every operation with
//! [`MongoConnector::connect`] / [`MongoConnector::disconnect`]. Whether that
//! means borrowing from a shared pool or dialing a fresh client is the
//! connector's business.

use async_trait::async_trait;
use mongodb::{Client, Database};
use tracing::{debug, warn};

use super::{MongoConfig, connect_from_config};
use crate::common::DatabaseResult;

/// A live client together with the logical database it was opened for
#[derive(Clone, Debug)]
pub struct MongoHandle {
    client: Client,
    database: Database,
}

impl MongoHandle {
    pub fn new(client: Client, database_name: &str) -> Self {
        let database = client.database(database_name);
        Self { client, database }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn into_client(self) -> Client {
        self.client
    }
}

/// Opens and closes MongoDB handles on behalf of a repository
#[async_trait]
pub trait MongoConnector: Send + Sync {
    /// Obtain a handle to the configured database
    async fn connect(&self) -> DatabaseResult<MongoHandle>;

    /// Give a handle back once the operation is finished
    async fn disconnect(&self, handle: MongoHandle);
}

/// Shares one pooled [`Client`] across all operations; `disconnect` is a no-op
#[derive(Clone, Debug)]
pub struct PooledConnector {
    handle: MongoHandle,
}

impl PooledConnector {
    pub fn new(client: Client, database_name: &str) -> Self {
        Self {
            handle: MongoHandle::new(client, database_name),
        }
    }

    /// Connect once (pinging the server) and share the resulting pool
    pub async fn from_config(config: &MongoConfig) -> DatabaseResult<Self> {
        let client = connect_from_config(config).await?;
        Ok(Self::new(client, config.database()))
    }

    pub fn client(&self) -> &Client {
        self.handle.client()
    }
}

#[async_trait]
impl MongoConnector for PooledConnector {
    async fn connect(&self) -> DatabaseResult<MongoHandle> {
        Ok(self.handle.clone())
    }

    async fn disconnect(&self, _handle: MongoHandle) {}
}

/// Dials a new client for every operation and shuts it down afterwards.
///
/// No pooling across requests; every call pays the connection handshake.
#[derive(Clone, Debug)]
pub struct PerRequestConnector {
    config: MongoConfig,
}

impl PerRequestConnector {
    pub fn new(config: MongoConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl MongoConnector for PerRequestConnector {
    async fn connect(&self) -> DatabaseResult<MongoHandle> {
        debug!(database = %self.config.database(), "Opening per-request MongoDB connection");
        let client = connect_from_config(&self.config).await.inspect_err(|e| {
            warn!(error = %e, "Failed to open per-request MongoDB connection");
        })?;
        Ok(MongoHandle::new(client, self.config.database()))
    }

    async fn disconnect(&self, handle: MongoHandle) {
        debug!("Closing per-request MongoDB connection");
        handle.into_client().shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::DatabaseError;

    #[tokio::test]
    async fn test_pooled_connector_hands_out_configured_database() {
        // Client construction is lazy; no server needed
        let client = Client::with_uri_str("mongodb://localhost:27017").await.unwrap();
        let connector = PooledConnector::new(client, "muebleria");

        let handle = connector.connect().await.unwrap();
        assert_eq!(handle.database().name(), "muebleria");
        connector.disconnect(handle).await;

        // Still usable after disconnect
        let again = connector.connect().await.unwrap();
        assert_eq!(again.database().name(), "muebleria");
    }

    #[tokio::test]
    async fn test_per_request_connector_surfaces_bad_url() {
        let connector = PerRequestConnector::new(MongoConfig::new("not-a-mongo-url"));
        assert!(matches!(
            connector.connect().await,
            Err(DatabaseError::Mongo(_))
        ));
    }
}
