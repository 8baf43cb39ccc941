//! API routes module

pub mod health;
pub mod muebles;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/muebles", muebles::router(state))
        .merge(health::router(state.clone()))
}
