use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{MuebleError, MuebleResult};
use crate::models::{CreateMueble, Envelope, Mueble, UpdateMueble};
use crate::query::{ListParams, MuebleQuery};
use crate::repository::MuebleRepository;
use crate::service::MuebleService;

pub const CREATED_MESSAGE: &str = "Registro creado";
pub const UPDATED_MESSAGE: &str = "Registro actualizado";
pub const DELETED_MESSAGE: &str = "Registro eliminado";

/// OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    paths(list_muebles, create_mueble, get_mueble, update_mueble, delete_mueble),
    components(schemas(Mueble, CreateMueble, UpdateMueble)),
    tags(
        (name = "Muebles", description = "Furniture catalog endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Catalog routes, meant to be nested under `/muebles`
pub fn router<R: MuebleRepository + 'static>(service: MuebleService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(list_muebles)
                .post(create_mueble)
                .put(missing_code)
                .delete(missing_code),
        )
        .route(
            "/{code}",
            get(get_mueble).put(update_mueble).delete(delete_mueble),
        )
        .with_state(shared_service)
}

fn parse_code(raw: &str) -> MuebleResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| MuebleError::InvalidCode(raw.to_string()))
}

/// List the catalog, optionally filtered by category or price
#[utoipa::path(
    get,
    path = "",
    tag = "Muebles",
    params(ListParams),
    responses(
        (status = 200, description = "Matching muebles", body = Envelope<Vec<Mueble>>),
        (status = 400, description = "Unparsable price bound", body = String, content_type = "text/plain"),
        (status = 500, description = "Storage failure", body = String, content_type = "text/plain")
    )
)]
async fn list_muebles<R: MuebleRepository>(
    State(service): State<Arc<MuebleService<R>>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> MuebleResult<Json<Envelope<Vec<Mueble>>>> {
    let Query(params) = params.map_err(|e| MuebleError::InvalidQuery(e.body_text()))?;
    let query = MuebleQuery::from_params(params)?;

    let muebles = service.list_muebles(query).await?;
    Ok(Json(Envelope::payload(muebles)))
}

/// Create a mueble; `codigo` is allocated when omitted
#[utoipa::path(
    post,
    path = "",
    tag = "Muebles",
    request_body = CreateMueble,
    responses(
        (status = 201, description = "Mueble created", body = Envelope<Mueble>),
        (status = 400, description = "Missing fields, malformed body or duplicate code", body = String, content_type = "text/plain"),
        (status = 500, description = "Storage failure", body = String, content_type = "text/plain")
    )
)]
async fn create_mueble<R: MuebleRepository>(
    State(service): State<Arc<MuebleService<R>>>,
    input: Result<Json<CreateMueble>, JsonRejection>,
) -> MuebleResult<impl IntoResponse> {
    let Json(input) = input.map_err(|e| MuebleError::InvalidBody(e.body_text()))?;

    let mueble = service.create_mueble(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_message(CREATED_MESSAGE, mueble)),
    ))
}

/// Get a mueble by its code
#[utoipa::path(
    get,
    path = "/{code}",
    tag = "Muebles",
    params(("code" = i64, Path, description = "Mueble code")),
    responses(
        (status = 200, description = "Mueble found", body = Envelope<Mueble>),
        (status = 400, description = "Unknown or non-numeric code", body = String, content_type = "text/plain"),
        (status = 500, description = "Storage failure", body = String, content_type = "text/plain")
    )
)]
async fn get_mueble<R: MuebleRepository>(
    State(service): State<Arc<MuebleService<R>>>,
    Path(code): Path<String>,
) -> MuebleResult<Json<Envelope<Mueble>>> {
    let code = parse_code(&code)?;

    let mueble = service.get_mueble(code).await?;
    Ok(Json(Envelope::payload(mueble)))
}

/// Replace the name, price and category of a mueble
#[utoipa::path(
    put,
    path = "/{code}",
    tag = "Muebles",
    params(("code" = i64, Path, description = "Mueble code")),
    request_body = UpdateMueble,
    responses(
        (status = 200, description = "Mueble updated", body = Envelope<Mueble>),
        (status = 400, description = "Missing fields or unknown code", body = String, content_type = "text/plain"),
        (status = 500, description = "Storage failure", body = String, content_type = "text/plain")
    )
)]
async fn update_mueble<R: MuebleRepository>(
    State(service): State<Arc<MuebleService<R>>>,
    Path(code): Path<String>,
    input: Result<Json<UpdateMueble>, JsonRejection>,
) -> MuebleResult<Json<Envelope<Mueble>>> {
    let code = parse_code(&code)?;
    let Json(input) = input.map_err(|e| MuebleError::InvalidBody(e.body_text()))?;

    let mueble = service.update_mueble(code, input).await?;
    Ok(Json(Envelope::with_message(UPDATED_MESSAGE, mueble)))
}

/// Delete a mueble by its code
#[utoipa::path(
    delete,
    path = "/{code}",
    tag = "Muebles",
    params(("code" = i64, Path, description = "Mueble code")),
    responses(
        (status = 200, description = "Mueble deleted", body = String, content_type = "text/plain"),
        (status = 400, description = "Nothing was deleted", body = String, content_type = "text/plain"),
        (status = 500, description = "Storage failure", body = String, content_type = "text/plain")
    )
)]
async fn delete_mueble<R: MuebleRepository>(
    State(service): State<Arc<MuebleService<R>>>,
    Path(code): Path<String>,
) -> MuebleResult<impl IntoResponse> {
    let code = parse_code(&code)?;

    service.delete_mueble(code).await?;
    Ok((StatusCode::OK, DELETED_MESSAGE))
}

/// `PUT`/`DELETE` on the collection itself: the code is required
async fn missing_code() -> MuebleResult<()> {
    Err(MuebleError::InvalidCode(String::new()))
}
