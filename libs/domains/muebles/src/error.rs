use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use database::DatabaseError;
use thiserror::Error;

/// Body of every 500 response; storage details stay in the logs.
pub const SERVER_ERROR_MESSAGE: &str = "Se ha generado un error en el servidor";

/// Client-facing messages are the `Display` text of each variant.
#[derive(Debug, Error)]
pub enum MuebleError {
    #[error("Faltan datos relevantes")]
    MissingFields(Vec<String>),

    #[error("Parámetro numérico inválido: {param}")]
    InvalidNumber { param: &'static str, value: String },

    #[error("Código inválido: {0}")]
    InvalidCode(String),

    #[error("Cuerpo de la petición inválido")]
    InvalidBody(String),

    #[error("Parámetros de consulta inválidos")]
    InvalidQuery(String),

    #[error("El código no corresponde a un mueble registrado")]
    NotFound(i64),

    #[error("Registro no eliminado")]
    NotDeleted(i64),

    #[error("Ya existe un mueble con el código {0}")]
    DuplicateCode(i64),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

pub type MuebleResult<T> = Result<T, MuebleError>;

impl MuebleError {
    pub fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Caused by the request rather than by the storage layer.
    ///
    /// Unknown codes count as client errors and answer 400, not 404.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, MuebleError::Database(_) | MuebleError::Connection(_))
    }
}

impl IntoResponse for MuebleError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_client_error() {
            tracing::info!(error = ?self, "Rejected request: {}", self);
            (status, self.to_string()).into_response()
        } else {
            tracing::error!(error = ?self, "Storage failure: {}", self);
            (status, SERVER_ERROR_MESSAGE).into_response()
        }
    }
}

impl From<mongodb::error::Error> for MuebleError {
    fn from(err: mongodb::error::Error) -> Self {
        MuebleError::Database(err.to_string())
    }
}

impl From<DatabaseError> for MuebleError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Mongo(e) => MuebleError::Database(e.to_string()),
            other => MuebleError::Connection(other.to_string()),
        }
    }
}
