use chrono::{DateTime, Utc};
use diesel::prelude::{Insertable, Queryable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{menu_items, order_items, orders, restaurant_tables, restaurants, users};

#[derive(Queryable, Insertable, Serialize, Deserialize, Clone)]
#[diesel(table_name = restaurants)]
pub struct Restaurant{
    pub restaurant_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>
}

#[derive(Queryable, Insertable, Clone)]
#[diesel(table_name = restaurant_tables)]
pub struct RestaurantTable{
    pub table_id: Uuid,
    pub restaurant_id: Uuid,
    pub table_number: i32,
    pub qr_code: String
}

#[derive(Queryable, Insertable, Clone)]
#[diesel(table_name = menu_items)]
pub struct MenuItem{
    pub item_id: Uuid,
    pub restaurant_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    // minor currency units
    pub price: i64,
    pub category: String,
    pub image: Option<String>,
    pub is_available: bool
}

#[derive(Queryable, Insertable, Clone)]
#[diesel(table_name = orders)]
pub struct Order{
    pub order_id: Uuid,
    pub restaurant_id: Uuid,
    pub table_number: i32,
    pub user_id: Option<Uuid>,
    pub total_amount: i64,
    pub status: String,
    pub payment_ref: Option<String>,
    pub created_at: DateTime<Utc>
}

#[derive(Queryable, Insertable, Clone)]
#[diesel(table_name = order_items)]
pub struct OrderItemRow{
    pub order_item_id: Uuid,
    pub order_id: Uuid,
    pub item_id: Uuid,
    pub quantity: i32,
    // unit price snapshotted at order time, minor currency units
    pub price: i64
}

#[derive(Queryable, Insertable)]
#[diesel(table_name = users)]
pub struct User{
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String
}
