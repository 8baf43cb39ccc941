//! Fallback handlers that answer in plain text, like the rest of the API's errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub const NOT_FOUND_MESSAGE: &str = "Recurso no encontrado";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Método no permitido para este recurso";

/// Router fallback for unknown paths.
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response()
}

/// Handler for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE).into_response()
}
