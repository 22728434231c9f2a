use crate::error::{ApiError, ErrorResponse};
use crate::hex::{validate, ValidationError};
use crate::routes;
use crate::state::AppState;
use axum::{body::Bytes, extract::Path, extract::State, http::StatusCode};

/// PUT /{key} handler - Store a value under a hex key
///
/// The body is the raw value. Surrounding ASCII whitespace is ignored so a value
/// sent with a trailing newline is still accepted.
#[utoipa::path(
    put,
    path = routes::KV_ITEM,
    params(
        ("key" = String, Path, description = "32-character hex key, any case")
    ),
    request_body(content = String, content_type = "text/plain", description = "32-character hex value"),
    responses(
        (status = 201, description = "Value stored"),
        (status = 400, description = "Invalid key or value, or empty body", body = ErrorResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse)
    ),
    tag = "kv"
)]
pub async fn put_handler(
    State(state): State<AppState>,
    Path(key_str): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let key = validate(&key_str).map_err(|e| ApiError::validation("key", e))?;

    let raw = std::str::from_utf8(&body).map_err(|_| {
        ApiError::validation(
            "value",
            ValidationError::InvalidFormat("body is not valid UTF-8".to_string()),
        )
    })?;
    let value = validate(raw.trim_ascii()).map_err(|e| ApiError::validation("value", e))?;

    state.store.put(&key, &value).await?;

    tracing::info!("Stored value for key: {}", key);
    Ok(StatusCode::CREATED)
}
