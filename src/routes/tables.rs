use actix_web::{error::{ErrorBadRequest, ErrorInternalServerError, ErrorNotFound}, web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{db_interaction::find_table_by_qr_code, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct TableQuery{
    #[serde(rename = "qrCode")]
    pub qr_code: Option<String>
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableResponse{
    pub restaurant_id: Uuid,
    pub restaurant_name: String,
    pub table_number: i32,
    pub restaurant: RestaurantSummary
}

// What a diner sees after scanning; contact details stay internal
#[derive(Serialize, Deserialize)]
pub struct RestaurantSummary{
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>
}

#[tracing::instrument(
    "Resolving qr code to restaurant and table",
    skip(pool)
)]
pub async fn resolve_table(
    pool: web::Data<DbPool>,
    query: web::Query<TableQuery>
) -> Result<HttpResponse, actix_web::Error> {
    let qr_code = match query.0.qr_code {
        Some(code) if !code.trim().is_empty() => code,
        _ => return Err(ErrorBadRequest("qrCode is required"))
    };

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let resolved = find_table_by_qr_code(conn, qr_code)
        .await
        .map_err(ErrorInternalServerError)?;

    match resolved {
        Some(resolved) => {
            let restaurant = resolved.restaurant;
            Ok(HttpResponse::Ok().json(TableResponse{
                restaurant_id: restaurant.restaurant_id,
                restaurant_name: restaurant.name.clone(),
                table_number: resolved.table_number,
                restaurant: RestaurantSummary{
                    id: restaurant.restaurant_id,
                    name: restaurant.name,
                    description: restaurant.description,
                    address: restaurant.address
                }
            }))
        },
        None => Err(ErrorNotFound("Table not found"))
    }
}
