use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::{
    Client, MongoConfig, MongoConnector, PerRequestConnector, PooledConnector,
    connect_from_config_with_retry,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::{Config, ConnectionMode};
use state::AppState;

/// Open the configured MongoDB connector.
///
/// Returns the pooled client as well so shutdown can close it.
async fn connect_storage(
    mode: ConnectionMode,
    mongodb: &MongoConfig,
) -> eyre::Result<(Arc<dyn MongoConnector>, Option<Client>)> {
    info!("Connecting to MongoDB at {}", mongodb.redacted_url());

    // Both modes wait for the server with retry before serving
    let client = connect_from_config_with_retry(mongodb, None).await?;

    info!(
        "Successfully connected to MongoDB database: {}",
        mongodb.database()
    );

    if mode == ConnectionMode::PerRequest {
        client.shutdown().await;
        let connector: Arc<dyn MongoConnector> =
            Arc::new(PerRequestConnector::new(mongodb.clone()));
        return Ok((connector, None));
    }

    let connector: Arc<dyn MongoConnector> =
        Arc::new(PooledConnector::new(client.clone(), mongodb.database()));
    Ok((connector, Some(client)))
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    info!(mode = %config.connection_mode, "Selected storage connection mode");

    let (connector, pooled_client) = match config.mongodb.as_ref() {
        Some(mongodb) => {
            let (connector, client) = connect_storage(config.connection_mode, mongodb).await?;
            api::muebles::init_indexes(&connector).await?;
            (Some(connector), client)
        }
        None => {
            warn!("Using the in-memory catalog; data is lost on restart");
            (None, None)
        }
    };

    let state = AppState { config, connector };

    // API routes plus liveness, so they share the tracing and CORS layers
    let api_routes = api::routes(&state).merge(health_router(state.config.app));

    let app = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)?;

    info!("Starting Muebleria API with graceful shutdown (30s timeout)");

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            if let Some(client) = pooled_client {
                info!("Shutting down: closing MongoDB connections");
                client.shutdown().await;
                info!("MongoDB connection closed successfully");
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Muebleria API shutdown complete");
    Ok(())
}
