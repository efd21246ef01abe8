use actix_web::{error::{ErrorBadRequest, ErrorInternalServerError}, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db_interaction::{create_order, orders::{CreateOrderError, NewOrderLine}},
    session_state::TypedSession,
    utils::{get_pooled_connection, DbPool},
};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest{
    pub restaurant_id: Option<Uuid>,
    pub table_number: Option<i32>,
    pub items: Option<Vec<SubmittedItem>>
}

// A cart line as submitted: the price is the diner's snapshot and is
// validated against the current menu before the order is written
#[derive(Deserialize, Debug)]
pub struct SubmittedItem{
    pub id: Uuid,
    pub quantity: i32,
    #[serde(with = "crate::domain::money::as_major")]
    pub price: i64
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse{
    pub order_id: Uuid,
    pub restaurant_id: Uuid,
    pub table_number: i32,
    pub user_id: Option<Uuid>,
    #[serde(with = "crate::domain::money::as_major")]
    pub total_amount: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemResponse>
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse{
    pub order_item_id: Uuid,
    pub menu_item_id: Uuid,
    pub quantity: i32,
    #[serde(with = "crate::domain::money::as_major")]
    pub price: i64
}

#[tracing::instrument(
    "Posting order",
    skip(pool, session)
)]
pub async fn post_order(
    pool: web::Data<DbPool>,
    body: web::Json<CreateOrderRequest>,
    session: TypedSession
) -> Result<HttpResponse, actix_web::Error> {
    let request = body.into_inner();

    let restaurant_id = request.restaurant_id
        .ok_or_else(|| ErrorBadRequest("restaurantId is required"))?;
    let table_number = request.table_number
        .ok_or_else(|| ErrorBadRequest("tableNumber is required"))?;
    let items = request.items
        .ok_or_else(|| ErrorBadRequest("items is required"))?;

    if items.is_empty() {
        return Err(ErrorBadRequest("items must not be empty"));
    }

    if items.iter().any(|item| item.quantity < 1) {
        return Err(ErrorBadRequest("item quantity must be at least 1"));
    }

    // Guest checkout is allowed: an order without a session has no owner
    let user_id = session.get_user_id()
        .map_err(ErrorInternalServerError)?;

    let lines: Vec<NewOrderLine> = items
        .iter()
        .map(|item| NewOrderLine{
            item_id: item.id,
            quantity: item.quantity,
            price: item.price
        })
        .collect();

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let created = create_order(conn, restaurant_id, table_number, user_id, lines)
        .await
        .map_err(|e| match e {
            CreateOrderError::ItemNotOnMenu(_) => ErrorBadRequest(e),
            CreateOrderError::PriceMismatch(_) => ErrorBadRequest(e),
            other => ErrorInternalServerError(other)
        })?;

    let order = created.order;
    Ok(HttpResponse::Created().json(OrderResponse{
        order_id: order.order_id,
        restaurant_id: order.restaurant_id,
        table_number: order.table_number,
        user_id: order.user_id,
        total_amount: order.total_amount,
        status: order.status,
        created_at: order.created_at,
        items: created.items
            .into_iter()
            .map(|item| OrderItemResponse{
                order_item_id: item.order_item_id,
                menu_item_id: item.item_id,
                quantity: item.quantity,
                price: item.price
            })
            .collect()
    }))
}
