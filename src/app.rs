use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api_doc::openapi_handler;
use crate::config::Config;
use crate::handlers::{get_order_handler, list_orders_handler, missing_order_id_handler};
use crate::routes;
use crate::state::AppState;

/// Build the CORS policy from the configured origins
///
/// Preflight requests are answered here and never reach a handler.
pub fn cors_layer(config: &Config) -> Result<CorsLayer> {
    let origins = config
        .cors_allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid CORS origin '{}'", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}

/// Assemble the full router: proxy routes, OpenAPI document, CORS and tracing
pub fn build_router(state: AppState) -> Result<Router> {
    let cors = cors_layer(&state.config)?;

    Ok(Router::new()
        .route(routes::GET_ORDERS, get(list_orders_handler))
        .route(routes::GET_ORDER, get(get_order_handler))
        .route(routes::GET_ORDER_EMPTY, get(missing_order_id_handler))
        .route(routes::OPENAPI_JSON, get(openapi_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}
