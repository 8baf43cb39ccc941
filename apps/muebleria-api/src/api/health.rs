//! Readiness endpoint

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::mongodb::check_health;

use crate::state::AppState;

/// Create a readiness router; liveness lives in `axum_helpers::health_router`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// 200 when MongoDB answers a ping, 503 otherwise
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let mut checks: Vec<(&str, HealthCheckFuture<'_>)> = Vec::new();

    if let Some(connector) = state.connector.as_ref() {
        let mongodb: HealthCheckFuture<'_> = Box::pin(async move {
            let handle = connector.connect().await.map_err(|e| e.to_string())?;
            let healthy = check_health(handle.database()).await;
            connector.disconnect(handle).await;

            if healthy {
                Ok(())
            } else {
                Err("ping failed".to_string())
            }
        });
        checks.push(("mongodb", mongodb));
    }

    run_health_checks(checks).await
}
