use crate::error::{ApiError, ErrorResponse};
use crate::handlers::relay::relay;
use crate::routes;
use crate::state::AppState;
use crate::upstream::check_order_id;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Response,
};

/// GET /get-order/{orderId} handler - Relay a single upstream order
#[utoipa::path(
    get,
    path = routes::GET_ORDER,
    params(
        ("orderId" = String, Path, description = "Upstream order identifier, must be non-empty")
    ),
    responses(
        (status = 200, description = "Upstream order JSON, relayed verbatim as application/json"),
        (status = 400, description = "orderId missing or not usable as a path segment", body = ErrorResponse),
        (status = 500, description = "Upstream unreachable or returned a non-200 status", body = ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn get_order_handler(
    State(state): State<AppState>,
    order_id: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(order_id) = order_id?;
    if order_id.trim().is_empty() {
        return Err(ApiError::MissingOrderId);
    }
    check_order_id(&order_id).map_err(|err| ApiError::InvalidOrderId(err.to_string()))?;

    let outcome = state.upstream.fetch_order(&order_id).await;
    relay(outcome, state.config.upstream_status_passthrough)
}

/// GET /get-order/ handler - The path variable is present but empty
pub async fn missing_order_id_handler() -> ApiError {
    tracing::info!("Rejected single order request without orderId");
    ApiError::MissingOrderId
}
