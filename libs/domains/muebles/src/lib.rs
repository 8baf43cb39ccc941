//! Muebles Domain
//!
//! Furniture catalog stored in the `muebles` MongoDB collection, keyed by an
//! integer business code (`codigo`).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, envelope and status mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Presence checks, code allocation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + MongoDB and in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Models/Query│  ← Entities, DTOs, filter and sort rules
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use database::mongodb::{MongoConfig, PooledConnector};
//! use domain_muebles::{handlers, MongoMuebleRepository, MuebleService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "muebleria");
//! let connector = PooledConnector::from_config(&config).await?;
//!
//! let repository = MongoMuebleRepository::new(Arc::new(connector));
//! repository.ensure_indexes().await?;
//!
//! let app = axum::Router::new().nest("/muebles", handlers::router(MuebleService::new(repository)));
//! # Ok(())
//! # }
//! ```

pub mod allocator;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod query;
pub mod repository;
pub mod service;

pub use error::{MuebleError, MuebleResult, SERVER_ERROR_MESSAGE};
pub use handlers::ApiDoc;
pub use models::{CreateMueble, Envelope, Mueble, MuebleFields, UpdateMueble};
pub use mongodb::MongoMuebleRepository;
pub use query::{ListParams, MuebleQuery, PriceRange, SortOrder};
pub use repository::{InMemoryMuebleRepository, MuebleRepository};
pub use service::MuebleService;
