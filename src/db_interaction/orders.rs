use std::{error::Error, fmt::Debug};

use anyhow::Context;
use chrono::{DateTime, Utc};
use diesel::{Connection, ExpressionMethods, JoinOnDsl, OptionalExtension, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    domain::order_status::OrderStatus,
    models::{Order, OrderItemRow},
    payments::CheckoutLine,
    telemetry::spawn_blocking_with_tracing,
    utils::{error_fmt_chain, DbConnection},
};

// One submitted cart line: the price is the client's snapshot, checked
// against the current menu before anything is written
#[derive(Debug, Clone)]
pub struct NewOrderLine{
    pub item_id: Uuid,
    pub quantity: i32,
    pub price: i64
}

pub struct CreatedOrder{
    pub order: Order,
    pub items: Vec<OrderItemRow>
}

// Error associated with creating an order and its line items
#[derive(Error)]
pub enum CreateOrderError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("item {0} is not on this restaurant's menu or is unavailable")]
    ItemNotOnMenu(Uuid),
    #[error("submitted price for item {0} does not match the current menu price")]
    PriceMismatch(Uuid)
}

impl Debug for CreateOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Creating order with line items",
    skip_all
)]
pub async fn create_order(
    mut conn: DbConnection,
    restaurant_id: Uuid,
    table_number: i32,
    user_id: Option<Uuid>,
    lines: Vec<NewOrderLine>
) -> Result<CreatedOrder, CreateOrderError> {

    let created = spawn_blocking_with_tracing(move || {
        use crate::schema::{menu_items, order_items, orders};

        conn.transaction::<CreatedOrder, CreateOrderError, _>(|conn|{
            let order_id = Uuid::new_v4();
            let mut item_rows = Vec::new();
            let mut total_amount: i64 = 0;

            // The total is recomputed here; a client-supplied total is never trusted
            for line in lines.iter() {
                let menu_price = menu_items::table
                    .filter(menu_items::item_id.eq(line.item_id))
                    .filter(menu_items::restaurant_id.eq(restaurant_id))
                    .filter(menu_items::is_available.eq(true))
                    .select(menu_items::price)
                    .first::<i64>(conn)
                    .optional()?;

                let menu_price = match menu_price {
                    Some(price) => price,
                    None => return Err(CreateOrderError::ItemNotOnMenu(line.item_id))
                };

                if menu_price != line.price {
                    return Err(CreateOrderError::PriceMismatch(line.item_id));
                }

                total_amount += menu_price * line.quantity as i64;

                item_rows.push(OrderItemRow{
                    order_item_id: Uuid::new_v4(),
                    order_id,
                    item_id: line.item_id,
                    quantity: line.quantity,
                    price: menu_price
                });
            }

            let order = Order{
                order_id,
                restaurant_id,
                table_number,
                user_id,
                total_amount,
                status: OrderStatus::Pending.as_str().to_string(),
                payment_ref: None,
                created_at: Utc::now()
            };

            diesel::insert_into(orders::table)
                .values(&order)
                .execute(conn)?;

            for item_row in item_rows.iter(){
                diesel::insert_into(order_items::table)
                    .values(item_row)
                    .execute(conn)?;
            }

            Ok(CreatedOrder{ order, items: item_rows })
        })
    })
    .await??;

    Ok(created)
}

// An order loaded for checkout: the raw row plus provider-ready line items
pub struct CheckoutOrder{
    pub order: Order,
    pub lines: Vec<CheckoutLine>
}

#[tracing::instrument(
    "Getting order with provider line items",
    skip(conn)
)]
pub async fn get_order_for_checkout(
    mut conn: DbConnection,
    order_id: Uuid
) -> Result<Option<CheckoutOrder>, anyhow::Error> {
    let res = spawn_blocking_with_tracing(move || {
        use crate::schema::{menu_items, order_items, orders};

        conn.transaction::<Option<CheckoutOrder>, anyhow::Error, _>(|conn|{
            let order = orders::table
                .filter(orders::order_id.eq(order_id))
                .first::<Order>(conn)
                .optional()
                .context("Failed to load order")?;

            let order = match order {
                Some(order) => order,
                None => return Ok(None)
            };

            let rows: Vec<(String, Option<String>, Option<String>, i64, i32)> = order_items::table
                .inner_join(menu_items::table.on(menu_items::item_id.eq(order_items::item_id)))
                .filter(order_items::order_id.eq(order_id))
                .select((
                    menu_items::name,
                    menu_items::description,
                    menu_items::image,
                    order_items::price,
                    order_items::quantity,
                ))
                .load(conn)
                .context("Failed to load order items for checkout")?;

            let lines = rows
                .into_iter()
                .map(|(name, description, image, price, quantity)| CheckoutLine{
                    name,
                    description,
                    image,
                    unit_amount: price,
                    quantity
                })
                .collect();

            Ok(Some(CheckoutOrder{ order, lines }))
        })
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

// Error associated with recording a payment reference on an order
#[derive(Error)]
pub enum RecordPaymentError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("checkout already initiated for order {0}")]
    AlreadyInitiated(Uuid)
}

impl Debug for RecordPaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// Guarded claim: only an order without a payment reference can take one,
// so two racing checkout calls cannot both record a session
#[tracing::instrument(
    "Recording payment reference on order",
    skip(conn)
)]
pub async fn record_payment_reference(
    mut conn: DbConnection,
    order_id: Uuid,
    reference: String,
    mark_paid: bool
) -> Result<(), RecordPaymentError> {

    let res = spawn_blocking_with_tracing(move || {
        use crate::schema::orders;

        conn.transaction::<(), RecordPaymentError, _>(|conn| {
            let target = orders::table
                .filter(orders::order_id.eq(order_id))
                .filter(orders::payment_ref.is_null());

            let affected_rows = if mark_paid {
                diesel::update(target)
                    .set((
                        orders::payment_ref.eq(reference),
                        orders::status.eq(OrderStatus::Paid.as_str())
                    ))
                    .execute(conn)?
            } else {
                diesel::update(target)
                    .set(orders::payment_ref.eq(reference))
                    .execute(conn)?
            };

            if affected_rows == 0 {
                return Err(RecordPaymentError::AlreadyInitiated(order_id))
            }

            Ok(())
        })
    })
    .await??;

    Ok(res)
}

// Struct to represent an order line within OrderWithItems
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub item_id: Uuid,
    pub name: String,
    pub quantity: i32,
    #[serde(with = "crate::domain::money::as_major")]
    pub price: i64,
}

// Struct to represent an order (with associated items) for display
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithItems {
    pub order_id: Uuid,
    pub restaurant_id: Uuid,
    pub restaurant_name: String,
    pub table_number: i32,
    #[serde(with = "crate::domain::money::as_major")]
    pub total_amount: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<HistoryItem>,
}

#[tracing::instrument(
    "Getting order history with items",
    skip(conn)
)]
pub async fn get_orders_for_user(
    mut conn: DbConnection,
    user_id: Uuid
) -> Result<Vec<OrderWithItems>, anyhow::Error> {

    let res = spawn_blocking_with_tracing(move || {
        use crate::schema::{menu_items, order_items, orders, restaurants};

        conn.transaction::<Vec<OrderWithItems>, anyhow::Error, _>(|conn|{
            // Most recent order first
            let owned: Vec<(Order, String)> = orders::table
                .inner_join(
                    restaurants::table
                        .on(restaurants::restaurant_id.eq(orders::restaurant_id))
                )
                .filter(orders::user_id.eq(user_id))
                .order(orders::created_at.desc())
                .select((orders::all_columns, restaurants::name))
                .load(conn)
                .context("Failed to load orders for user")?;

            let mut ret = Vec::new();

            for (order, restaurant_name) in owned {
                let items: Vec<(Uuid, String, i32, i64)> = order_items::table
                    .inner_join(menu_items::table.on(menu_items::item_id.eq(order_items::item_id)))
                    .filter(order_items::order_id.eq(order.order_id))
                    .select((
                        order_items::item_id,
                        menu_items::name,
                        order_items::quantity,
                        order_items::price,
                    ))
                    .load(conn)
                    .context("Failed to load order items")?;

                ret.push(OrderWithItems{
                    order_id: order.order_id,
                    restaurant_id: order.restaurant_id,
                    restaurant_name,
                    table_number: order.table_number,
                    total_amount: order.total_amount,
                    status: order.status,
                    created_at: order.created_at,
                    items: items
                        .into_iter()
                        .map(|(item_id, name, quantity, price)| HistoryItem{
                            item_id,
                            name,
                            quantity,
                            price
                        })
                        .collect()
                });
            }

            Ok(ret)
        })
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}
