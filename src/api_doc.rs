use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::BulkResponse;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "hex-kv-gateway API",
        version = "0.1.0",
        description = "Validated 128-bit hex key-value gateway backed by Redis"
    ),
    paths(
        handlers::health::health_handler,
        handlers::put::put_handler,
        handlers::get::get_handler,
        handlers::bulk::bulk_handler
    ),
    components(
        schemas(
            BulkResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "kv", description = "Key-value operations")
    )
)]
pub struct ApiDoc;
