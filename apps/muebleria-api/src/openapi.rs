//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Muebleria API",
        version = "0.1.0",
        description = "Furniture catalog backed by MongoDB"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/muebles", api = domain_muebles::ApiDoc)
    ),
    tags(
        (name = "Muebles", description = "Furniture catalog endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;
