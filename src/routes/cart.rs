use actix_web::{error::{ErrorBadRequest, ErrorInternalServerError}, web, HttpResponse};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    cart::{Cart, CartLine},
    db_interaction::get_available_menu_item,
    domain::menu_category::MenuCategory,
    session_state::TypedSession,
    utils::{get_pooled_connection, DbPool},
};

// The session cart as shown to the diner
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView{
    pub restaurant_id: Option<Uuid>,
    pub table_number: Option<i32>,
    pub items: Vec<CartLine>,
    #[serde(with = "crate::domain::money::as_major")]
    pub total_price: i64,
    pub total_item_count: i64
}

impl From<Cart> for CartView {
    fn from(cart: Cart) -> Self {
        let binding = cart.binding();
        CartView{
            restaurant_id: binding.map(|b| b.restaurant_id),
            table_number: binding.map(|b| b.table_number),
            total_price: cart.total_price(),
            total_item_count: cart.total_item_count(),
            items: cart.lines().to_vec()
        }
    }
}

fn load_cart(session: &TypedSession) -> Result<Cart, actix_web::Error>{
    Ok(session.get_cart()
        .map_err(ErrorInternalServerError)?
        .unwrap_or_default())
}

fn save_and_render(session: &TypedSession, cart: Cart) -> Result<HttpResponse, actix_web::Error>{
    session.insert_cart(&cart)
        .context("Failed to store cart in session")
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(CartView::from(cart)))
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest{
    pub restaurant_id: Option<Uuid>,
    pub table_number: Option<i32>,
    pub id: Option<Uuid>,
    pub quantity: Option<i32>
}

#[tracing::instrument(
    "Adding item to session cart",
    skip(pool, session)
)]
pub async fn add_cart_item(
    pool: web::Data<DbPool>,
    body: web::Json<AddCartItemRequest>,
    session: TypedSession
) -> Result<HttpResponse, actix_web::Error> {
    let request = body.into_inner();

    let restaurant_id = request.restaurant_id
        .ok_or_else(|| ErrorBadRequest("restaurantId is required"))?;
    let table_number = request.table_number
        .ok_or_else(|| ErrorBadRequest("tableNumber is required"))?;
    let item_id = request.id
        .ok_or_else(|| ErrorBadRequest("id is required"))?;
    let quantity = request.quantity.unwrap_or(1);

    if quantity < 1 {
        return Err(ErrorBadRequest("quantity must be at least 1"));
    }

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let item = get_available_menu_item(conn, restaurant_id, item_id)
        .await
        .map_err(ErrorInternalServerError)?
        .ok_or_else(|| ErrorBadRequest("item is not on this restaurant's menu"))?;

    let category = MenuCategory::parse(&item.category)
        .map_err(|e| ErrorInternalServerError(anyhow::anyhow!(e)))?;

    let mut cart = load_cart(&session)?;
    cart.add_item(
        CartLine{
            id: item.item_id,
            name: item.name,
            price: item.price,
            quantity,
            category,
            image: item.image
        },
        restaurant_id,
        table_number
    );

    save_and_render(&session, cart)
}

#[derive(Deserialize, Debug)]
pub struct UpdateQuantityRequest{
    pub quantity: i32
}

#[tracing::instrument(
    "Updating quantity of cart line",
    skip(session)
)]
pub async fn update_cart_item(
    path: web::Path<Uuid>,
    body: web::Json<UpdateQuantityRequest>,
    session: TypedSession
) -> Result<HttpResponse, actix_web::Error> {
    let mut cart = load_cart(&session)?;
    cart.update_quantity(path.into_inner(), body.quantity);

    save_and_render(&session, cart)
}

#[tracing::instrument(
    "Removing line from session cart",
    skip(session)
)]
pub async fn remove_cart_item(
    path: web::Path<Uuid>,
    session: TypedSession
) -> Result<HttpResponse, actix_web::Error> {
    let mut cart = load_cart(&session)?;
    cart.remove_item(path.into_inner());

    save_and_render(&session, cart)
}

#[tracing::instrument(
    "Getting session cart",
    skip(session)
)]
pub async fn get_cart(
    session: TypedSession
) -> Result<HttpResponse, actix_web::Error> {
    let cart = load_cart(&session)?;
    Ok(HttpResponse::Ok().json(CartView::from(cart)))
}

#[tracing::instrument(
    "Clearing session cart",
    skip(session)
)]
pub async fn clear_cart(
    session: TypedSession
) -> Result<HttpResponse, actix_web::Error> {
    session.remove_cart();
    Ok(HttpResponse::Ok().json(CartView::from(Cart::new())))
}
