use anyhow::Context;
use diesel::{ExpressionMethods, JoinOnDsl, OptionalExtension, QueryDsl, RunQueryDsl};

use crate::{models::Restaurant, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

// A QR code resolved to its owning restaurant and table number
pub struct ResolvedTable{
    pub restaurant: Restaurant,
    pub table_number: i32
}

#[tracing::instrument(
    "Resolving table from qr code",
    skip(conn)
)]
pub async fn find_table_by_qr_code(
    mut conn: DbConnection,
    qr_code: String
) -> Result<Option<ResolvedTable>, anyhow::Error> {
    let res = spawn_blocking_with_tracing(move || {
        use crate::schema::{restaurant_tables, restaurants};

        restaurant_tables::table
            .inner_join(
                restaurants::table
                    .on(restaurants::restaurant_id.eq(restaurant_tables::restaurant_id))
            )
            .filter(restaurant_tables::qr_code.eq(qr_code))
            .select((restaurant_tables::table_number, restaurants::all_columns))
            .first::<(i32, Restaurant)>(&mut conn)
            .optional()
            .context("Failed to look up table by qr code")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res.map(|(table_number, restaurant)| ResolvedTable{ restaurant, table_number }))
}
