pub mod order;
pub mod orders;
mod relay;

pub use order::{get_order_handler, missing_order_id_handler};
pub use orders::list_orders_handler;
