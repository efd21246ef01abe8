use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use tableside::domain::menu_category::MenuCategory;
use tableside::schema::orders;
use uuid::Uuid;
use wiremock::{
    matchers::{header_exists, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::TestApp;

fn provider_session_body() -> serde_json::Value {
    serde_json::json!({
        "id": "cs_test_123",
        "url": "https://pay.example.com/c/cs_test_123"
    })
}

async fn order_on_menu(app: &TestApp) -> Uuid {
    let restaurant = app.seed_restaurant("The Gourmet Table");
    let starter = app.seed_menu_item(restaurant.restaurant_id, "Prawn Tempura", 899, MenuCategory::Starters, true);
    let main = app.seed_menu_item(restaurant.restaurant_id, "Grilled Salmon", 2499, MenuCategory::Main, true);

    app.create_order(
        restaurant.restaurant_id,
        3,
        &serde_json::json!([
            { "id": starter.item_id, "quantity": 2, "price": 8.99 },
            { "id": main.item_id, "quantity": 1, "price": 24.99 }
        ])
    ).await
}

fn checkout_body(order_id: Uuid) -> serde_json::Value {
    serde_json::json!({
        "orderId": order_id,
        "successUrl": "https://diner.example.com/success",
        "cancelUrl": "https://diner.example.com/cancel"
    })
}

#[actix_web::test]
async fn checkout_without_order_id_returns_400(){
    let app = TestApp::spawn_app().await;

    let body = serde_json::json!({
        "successUrl": "https://diner.example.com/success",
        "cancelUrl": "https://diner.example.com/cancel"
    });

    let response = app.post_checkout(&body).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn checkout_of_unknown_order_returns_404(){
    let app = TestApp::spawn_app().await;

    let response = app.post_checkout(&checkout_body(Uuid::new_v4())).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn checkout_without_provider_takes_the_mock_path(){
    let app = TestApp::spawn_app_without_provider().await;
    let order_id = order_on_menu(&app).await;

    let response = app.post_checkout(&checkout_body(order_id)).await;
    assert_eq!(response.status().as_u16(), 200);

    let body = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["isMock"], true);
    assert_eq!(body["sessionId"].as_str().unwrap(), format!("mock_{}", order_id));
    assert_eq!(body["url"], "https://diner.example.com/success");

    // the order is treated as settled without any external call
    let requests = app.payment_api.received_requests().await.unwrap();
    assert_eq!(requests.len(), 0);

    let mut conn = app.pool.get().unwrap();
    let (payment_ref, status): (Option<String>, String) = orders::table
        .filter(orders::order_id.eq(order_id))
        .select((orders::payment_ref, orders::status))
        .get_result(&mut conn)
        .unwrap();

    assert_eq!(payment_ref.unwrap(), format!("mock_{}", order_id));
    assert_eq!(status, "PAID");
}

#[actix_web::test]
async fn checkout_with_provider_creates_hosted_session(){
    let app = TestApp::spawn_app().await;
    let order_id = order_on_menu(&app).await;

    let guard = Mock::given(path("/v1/checkout/sessions"))
        .and(method("POST"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_session_body()))
        .expect(1)
        .mount_as_scoped(&app.payment_api)
        .await;

    let response = app.post_checkout(&checkout_body(order_id)).await;
    assert_eq!(response.status().as_u16(), 200);

    let body = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["sessionId"], "cs_test_123");
    assert_eq!(body["url"], "https://pay.example.com/c/cs_test_123");
    assert!(body.get("isMock").is_none());

    // one provider-ready line item per order item, order id in metadata
    let requests = guard.received_requests().await;
    let sent: serde_json::Value = requests[0].body_json().unwrap();
    assert_eq!(sent["mode"], "payment");
    assert_eq!(sent["success_url"], "https://diner.example.com/success");
    assert_eq!(sent["cancel_url"], "https://diner.example.com/cancel");
    assert_eq!(sent["metadata"]["orderId"].as_str().unwrap(), order_id.to_string());

    let line_items = sent["line_items"].as_array().unwrap();
    assert_eq!(line_items.len(), 2);
    let tempura = line_items.iter()
        .find(|line| line["name"] == "Prawn Tempura")
        .unwrap();
    assert_eq!(tempura["unit_amount"], 899);
    assert_eq!(tempura["quantity"], 2);

    let mut conn = app.pool.get().unwrap();
    let (payment_ref, status): (Option<String>, String) = orders::table
        .filter(orders::order_id.eq(order_id))
        .select((orders::payment_ref, orders::status))
        .get_result(&mut conn)
        .unwrap();

    assert_eq!(payment_ref.unwrap(), "cs_test_123");
    // the hosted path stays pending until the provider confirms payment
    assert_eq!(status, "PENDING");
}

#[actix_web::test]
async fn provider_failure_leaves_order_in_pre_checkout_state(){
    let app = TestApp::spawn_app().await;
    let order_id = order_on_menu(&app).await;

    Mock::given(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.payment_api)
        .await;

    let response = app.post_checkout(&checkout_body(order_id)).await;
    assert_eq!(response.status().as_u16(), 500);

    let mut conn = app.pool.get().unwrap();
    let (payment_ref, status): (Option<String>, String) = orders::table
        .filter(orders::order_id.eq(order_id))
        .select((orders::payment_ref, orders::status))
        .get_result(&mut conn)
        .unwrap();

    assert!(payment_ref.is_none());
    assert_eq!(status, "PENDING");
}

#[actix_web::test]
async fn second_checkout_on_same_order_is_rejected(){
    let app = TestApp::spawn_app_without_provider().await;
    let order_id = order_on_menu(&app).await;

    let first = app.post_checkout(&checkout_body(order_id)).await;
    assert_eq!(first.status().as_u16(), 200);

    let second = app.post_checkout(&checkout_body(order_id)).await;
    assert_eq!(second.status().as_u16(), 400);

    // the original reference is untouched
    let mut conn = app.pool.get().unwrap();
    let payment_ref: Option<String> = orders::table
        .filter(orders::order_id.eq(order_id))
        .select(orders::payment_ref)
        .get_result(&mut conn)
        .unwrap();

    assert_eq!(payment_ref.unwrap(), format!("mock_{}", order_id));
}
