pub mod get;
pub mod post;

pub use get::get_order_history;
pub use post::post_order;
