//! Database library providing MongoDB connectors and utilities
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB support
//! - `config` - Configuration support with `core_config::FromEnv`
//!
//! # Examples
//!
//! ```ignore
//! use database::mongodb;
//!
//! let client = mongodb::connect("mongodb://localhost:27017").await?;
//! let db = client.database("muebleria");
//! ```
//!
//! Repositories that should not own a client take a [`mongodb::MongoConnector`]
//! instead and connect/disconnect around each operation:
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, MongoConnector, PooledConnector};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "muebleria");
//! let connector = PooledConnector::from_config(&config).await?;
//! let handle = connector.connect().await?;
//! let muebles = handle.database().collection::<Document>("muebles");
//! connector.disconnect(handle).await;
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
