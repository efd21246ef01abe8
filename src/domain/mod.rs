pub mod menu_category;
pub mod money;
pub mod order_status;
pub mod user_email;
