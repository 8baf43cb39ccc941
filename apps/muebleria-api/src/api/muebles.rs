//! Muebles API routes
//!
//! Wires the muebles domain to HTTP, picking the repository from the
//! configured connection mode.

use std::sync::Arc;

use axum::Router;
use database::mongodb::MongoConnector;
use domain_muebles::{InMemoryMuebleRepository, MongoMuebleRepository, MuebleService, handlers};

use crate::state::AppState;

/// Create muebles router
pub fn router(state: &AppState) -> Router {
    match &state.connector {
        Some(connector) => {
            let repository = MongoMuebleRepository::new(Arc::clone(connector));
            handlers::router(MuebleService::new(repository))
        }
        None => handlers::router(MuebleService::new(InMemoryMuebleRepository::new())),
    }
}

/// Create the unique index on `codigo`
pub async fn init_indexes(connector: &Arc<dyn MongoConnector>) -> eyre::Result<()> {
    MongoMuebleRepository::new(Arc::clone(connector))
        .ensure_indexes()
        .await?;
    Ok(())
}
