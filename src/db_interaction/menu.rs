use anyhow::Context;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl};
use uuid::Uuid;

use crate::{models::MenuItem, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

// Only servable (available) items are returned; unavailable rows never
// leave the database layer
#[tracing::instrument(
    "Getting available menu items for restaurant",
    skip(conn)
)]
pub async fn get_available_menu_items(
    mut conn: DbConnection,
    restaurant_id: Uuid
) -> Result<Vec<MenuItem>, anyhow::Error>{
    let res = spawn_blocking_with_tracing(move || {
        use crate::schema::menu_items;

        menu_items::table
            .filter(menu_items::restaurant_id.eq(restaurant_id))
            .filter(menu_items::is_available.eq(true))
            .load::<MenuItem>(&mut conn)
            .context("Failed to get menu items")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

// Looks up one servable item, scoped to the restaurant; the cart always
// takes its name and price from here, never from the client
#[tracing::instrument(
    "Getting single available menu item",
    skip(conn)
)]
pub async fn get_available_menu_item(
    mut conn: DbConnection,
    restaurant_id: Uuid,
    item_id: Uuid
) -> Result<Option<MenuItem>, anyhow::Error>{
    let res = spawn_blocking_with_tracing(move || {
        use crate::schema::menu_items;

        menu_items::table
            .filter(menu_items::item_id.eq(item_id))
            .filter(menu_items::restaurant_id.eq(restaurant_id))
            .filter(menu_items::is_available.eq(true))
            .first::<MenuItem>(&mut conn)
            .optional()
            .context("Failed to get menu item")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}
