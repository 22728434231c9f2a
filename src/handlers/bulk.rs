use crate::error::{ApiError, ErrorResponse};
use crate::models::{BulkRequest, BulkResponse};
use crate::routes;
use crate::state::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};

/// POST /bulk handler - Store many key/value pairs in one call
///
/// Validation is all-or-nothing: one malformed key or value rejects the
/// batch before anything is written. Writes are not: each pair is written
/// independently and a failed write is not rolled back, so `stored` may be
/// lower than the number of pairs sent. That count is the record of what
/// actually landed.
#[utoipa::path(
    post,
    path = routes::BULK,
    request_body(
        content = std::collections::HashMap<String, String>,
        description = "JSON object mapping 32-character hex keys to 32-character hex values"
    ),
    responses(
        (status = 200, description = "Number of pairs written", body = BulkResponse),
        (status = 400, description = "Empty, malformed, or invalid payload", body = ErrorResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse)
    ),
    tag = "kv"
)]
pub async fn bulk_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<BulkResponse>), ApiError> {
    let request = BulkRequest::from_json(&body)?;
    let requested = request.entries.len();

    let stored = state.store.bulk_put(&request.entries).await?;

    if stored < requested {
        tracing::warn!("Bulk write stored {} of {} entries", stored, requested);
    } else {
        tracing::info!("Bulk write stored {} entries", stored);
    }

    Ok((StatusCode::OK, Json(BulkResponse { stored })))
}
