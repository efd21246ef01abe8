use actix_web::{error::ErrorInternalServerError, web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db_interaction::get_available_menu_items,
    domain::menu_category::MenuCategory,
    models::MenuItem,
    utils::{get_pooled_connection, DbPool},
};

// The diner-facing projection of a menu item; availability is an
// internal field and never leaves the server
#[derive(Serialize, Deserialize)]
pub struct MenuItemResponse{
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "crate::domain::money::as_major")]
    pub price: i64,
    pub category: MenuCategory,
    pub image: Option<String>
}

impl TryFrom<MenuItem> for MenuItemResponse {
    type Error = anyhow::Error;

    fn try_from(item: MenuItem) -> Result<Self, Self::Error> {
        let category = MenuCategory::parse(&item.category)
            .map_err(|e| anyhow::anyhow!(e))?;

        Ok(MenuItemResponse{
            id: item.item_id,
            name: item.name,
            description: item.description,
            price: item.price,
            category,
            image: item.image
        })
    }
}

#[tracing::instrument(
    "Getting menu for restaurant",
    skip(pool)
)]
pub async fn get_menu(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>
) -> Result<HttpResponse, actix_web::Error> {
    let restaurant_id = path.into_inner();

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let items = get_available_menu_items(conn, restaurant_id)
        .await
        .map_err(ErrorInternalServerError)?;

    let body: Vec<MenuItemResponse> = items
        .into_iter()
        .map(MenuItemResponse::try_from)
        .collect::<Result<_, _>>()
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(body))
}
