//! MongoDB connection management and helpers

mod config;
mod connection;
mod connector;
mod health;

pub use config::{DATABASE_VARS, MongoConfig, URL_VARS};
pub use connection::{MongoConnector, MongoHandle, PerRequestConnector, PooledConnector};
pub use connector::{client_options, connect, connect_from_config, connect_from_config_with_retry};
pub use health::{HealthStatus, check_health, check_health_detailed};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
