use crate::error::{ApiError, ErrorResponse};
use crate::hex::validate;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode};

/// GET /{key} handler - Retrieve the value stored under a hex key
#[utoipa::path(
    get,
    path = routes::KV_ITEM,
    params(
        ("key" = String, Path, description = "32-character hex key, any case")
    ),
    responses(
        (status = 200, description = "Lowercase hex value", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid key format", body = ErrorResponse),
        (status = 404, description = "Key not found", body = ErrorResponse),
        (status = 500, description = "Stored value is not valid hex", body = ErrorResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse)
    ),
    tag = "kv"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key_str): Path<String>,
) -> Result<(StatusCode, String), ApiError> {
    let key = validate(&key_str).map_err(|e| ApiError::validation("key", e))?;

    match state.store.get(&key).await? {
        Some(value) => {
            tracing::debug!("Retrieved value for key: {}", key);
            Ok((StatusCode::OK, value.into_inner()))
        }
        None => {
            tracing::debug!("Key not found: {}", key);
            Err(ApiError::KeyNotFound(key))
        }
    }
}
