// Route path constants - single source of truth for all API paths

pub const GET_ORDERS: &str = "/get-orders";
pub const GET_ORDER: &str = "/get-order/{orderId}";
/// `/get-order/` with an empty id, answered with 400 instead of 404
pub const GET_ORDER_EMPTY: &str = "/get-order/";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
