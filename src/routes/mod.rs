pub mod authentication;
pub mod cart;
pub mod checkout;
pub mod health_check;
pub mod menu;
pub mod order;
pub mod tables;

pub use authentication::{login, logout, register};
pub use cart::{add_cart_item, clear_cart, get_cart, remove_cart_item, update_cart_item};
pub use checkout::post_checkout;
pub use health_check::health_check;
pub use menu::get_menu;
pub use order::{get_order_history, post_order};
pub use tables::resolve_table;
