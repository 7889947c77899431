use axum::Json;
use utoipa::OpenApi;

use crate::dataset::{CrashRecord, FilterOptions};
use crate::server::data::{QueryRequest, QueryResponse};
use crate::server::error::{ApiErrorBody, ApiErrorResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Crashlens API",
        version = "0.1.0",
        description = "Query engine for NYC traffic-crash records"
    ),
    paths(
        crate::server::filters::filter_options,
        crate::server::data::query_data,
    ),
    components(schemas(
        CrashRecord,
        FilterOptions,
        QueryRequest,
        QueryResponse,
        ApiErrorResponse,
        ApiErrorBody,
    ))
)]
pub struct ApiDoc;

pub(crate) async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
