use axum::Json;
use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "orders-proxy API",
        version = "1.0.0",
        description = "Pass-through proxy for the upstream orders API"
    ),
    paths(
        handlers::orders::list_orders_handler,
        handlers::order::get_order_handler
    ),
    components(
        schemas(ErrorResponse)
    ),
    tags(
        (name = "orders", description = "Upstream order relay operations")
    )
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json handler
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_both_routes() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/get-orders"));
        assert!(doc.paths.paths.contains_key("/get-order/{orderId}"));
    }

    #[test]
    fn test_openapi_serializes() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();

        assert_eq!(json["info"]["title"], "orders-proxy API");
    }
}
