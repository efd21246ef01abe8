pub mod menu;
pub mod orders;
pub mod tables;
pub mod users;

pub use menu::{get_available_menu_item, get_available_menu_items};
pub use orders::{create_order, get_order_for_checkout, get_orders_for_user, record_payment_reference};
pub use tables::find_table_by_qr_code;
pub use users::{get_user_from_email, insert_user};
