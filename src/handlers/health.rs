use crate::error::{HealthResponse, UnhealthyResponse};
use crate::monitor::HealthStatus;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /health handler - Health check endpoint
///
/// Pings the store on every call. Returns 200 OK if it answers, 503 Service
/// Unavailable otherwise.
#[utoipa::path(
    get,
    path = routes::HEALTH,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Store is unreachable", body = UnhealthyResponse)
    ),
    tag = "health"
)]
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<HealthResponse>), (StatusCode, Json<UnhealthyResponse>)> {
    match state.health.probe().await {
        HealthStatus::Ok => Ok((
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
            }),
        )),
        HealthStatus::Unavailable(reason) => {
            tracing::error!("Health check failed: {}", reason);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(UnhealthyResponse {
                    status: "unavailable".to_string(),
                    error: format!("Store unavailable: {}", reason),
                }),
            ))
        }
    }
}
