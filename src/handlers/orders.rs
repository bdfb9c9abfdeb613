use crate::error::{ApiError, ErrorResponse};
use crate::handlers::relay::relay;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, response::Response};

/// GET /get-orders handler - Relay the upstream order collection
#[utoipa::path(
    get,
    path = routes::GET_ORDERS,
    responses(
        (status = 200, description = "Upstream orders JSON, relayed verbatim as application/json"),
        (status = 500, description = "Upstream unreachable or returned a non-200 status", body = ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn list_orders_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let outcome = state.upstream.fetch_orders().await;
    relay(outcome, state.config.upstream_status_passthrough)
}
