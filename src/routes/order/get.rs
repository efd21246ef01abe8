use actix_web::{error::{ErrorInternalServerError, ErrorUnauthorized}, web, HttpResponse};

use crate::{
    db_interaction::get_orders_for_user,
    session_state::TypedSession,
    utils::{get_pooled_connection, DbPool},
};

#[tracing::instrument(
    "Getting order history for signed-in user",
    skip(pool, session)
)]
pub async fn get_order_history(
    pool: web::Data<DbPool>,
    session: TypedSession
) -> Result<HttpResponse, actix_web::Error> {
    let user_id = session.get_user_id()
        .map_err(ErrorInternalServerError)?
        .ok_or_else(|| ErrorUnauthorized("Not logged in"))?;

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let orders = get_orders_for_user(conn, user_id)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(orders))
}
