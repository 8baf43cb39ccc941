use super::shutdown::ShutdownCoordinator;
use crate::errors::{method_not_allowed, not_found};
use crate::http::{cors_layer_from_env, security_headers};
use axum::{Json, Router, middleware, routing::get};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Path the OpenAPI document is served from
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Wraps the API routes with the cross-cutting concerns every service gets:
///
/// - the OpenAPI document of `T` at [`OPENAPI_PATH`]
/// - plain-text 404 and 405 fallbacks
/// - request tracing, security headers, response compression
/// - CORS, when `CORS_ALLOWED_ORIGIN` is set
///
/// Routes keep the paths they were declared with; domain routers should
/// already carry their own state.
///
/// # Errors
/// Fails if `CORS_ALLOWED_ORIGIN` is set but malformed.
pub fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let openapi = T::openapi();

    let router = Router::new()
        .route(OPENAPI_PATH, get(move || async move { Json(openapi) }))
        .merge(apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(CompressionLayer::new());

    Ok(match cors_layer_from_env()? {
        Some(cors) => router.layer(cors),
        None => router,
    })
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup` with a deadline.
///
/// In-flight requests are allowed to finish before `cleanup` starts.
/// A `cleanup` that exceeds `shutdown_timeout` is abandoned with a warning.
///
/// ```ignore
/// create_production_app(router, &config, Duration::from_secs(30), async move {
///     client.shutdown().await;
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on http://{}/", listener.local_addr()?);

    let coordinator = ShutdownCoordinator::default();
    let signal_task = {
        let coordinator = coordinator.clone();
        tokio::spawn(async move { coordinator.wait_for_signal().await })
    };

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown({
            let coordinator = coordinator.clone();
            async move { coordinator.notified().await }
        })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    signal_task.abort();

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => tracing::warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}
