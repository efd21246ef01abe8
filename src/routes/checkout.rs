use actix_web::{error::{ErrorBadRequest, ErrorInternalServerError, ErrorNotFound}, web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db_interaction::{get_order_for_checkout, orders::RecordPaymentError, record_payment_reference},
    payments::PaymentGateway,
    utils::{get_pooled_connection, DbPool},
};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest{
    pub order_id: Option<Uuid>,
    pub success_url: Option<String>,
    pub cancel_url: Option<String>
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse{
    pub session_id: String,
    pub url: String,
    // only present on the mock path, so a caller can not mistake it for a real charge
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_mock: bool
}

#[tracing::instrument(
    "Initiating checkout for order",
    skip(pool, gateway)
)]
pub async fn post_checkout(
    pool: web::Data<DbPool>,
    gateway: web::Data<PaymentGateway>,
    body: web::Json<CheckoutRequest>
) -> Result<HttpResponse, actix_web::Error> {
    let request = body.into_inner();

    let order_id = request.order_id
        .ok_or_else(|| ErrorBadRequest("orderId is required"))?;
    let success_url = request.success_url
        .ok_or_else(|| ErrorBadRequest("successUrl is required"))?;
    let cancel_url = request.cancel_url
        .ok_or_else(|| ErrorBadRequest("cancelUrl is required"))?;

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let checkout_order = get_order_for_checkout(conn, order_id)
        .await
        .map_err(ErrorInternalServerError)?;

    let checkout_order = match checkout_order {
        Some(order) => order,
        None => return Err(ErrorNotFound("Order not found"))
    };

    // Initiating twice would risk a double charge; the first session wins
    if checkout_order.order.payment_ref.is_some() {
        return Err(ErrorBadRequest("Checkout already initiated for this order"));
    }

    let session = gateway.initiate(
        order_id,
        &checkout_order.lines,
        &success_url,
        &cancel_url
    )
    .await
    .map_err(ErrorInternalServerError)?;

    // The reference is written by a guarded update; on failure the order
    // keeps its pre-checkout state
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    record_payment_reference(conn, order_id, session.session_id.clone(), session.is_mock)
        .await
        .map_err(|e| match e {
            RecordPaymentError::AlreadyInitiated(_) => ErrorBadRequest(e),
            other => ErrorInternalServerError(other)
        })?;

    Ok(HttpResponse::Ok().json(CheckoutResponse{
        session_id: session.session_id,
        url: session.url,
        is_mock: session.is_mock
    }))
}
