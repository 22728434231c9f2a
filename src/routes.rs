// Route path constants - single source of truth for all API paths

use axum::{routing::{get, post}, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers::{bulk_handler, get_handler, health_handler, put_handler};
use crate::state::AppState;

pub const HEALTH: &str = "/health";
pub const BULK: &str = "/bulk";
pub const KV_ITEM: &str = "/{key}";
pub const DOCS: &str = "/docs";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Build the full application router
///
/// Static paths win over `/{key}` in axum's matcher, so `/health` and
/// `/bulk` never reach the key handlers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH, get(health_handler))
        .route(BULK, post(bulk_handler))
        .route(KV_ITEM, get(get_handler).put(put_handler))
        .merge(SwaggerUi::new(DOCS).url(OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
