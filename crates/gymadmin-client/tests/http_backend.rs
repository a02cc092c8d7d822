//! `HttpAdminClient` against a mock REST server

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use gymadmin_client::{AdminApi, HttpAdminClient};
use gymadmin_core::{Category, Error, Order, OrderStatus, Product};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client(server: &MockServer) -> HttpAdminClient {
    HttpAdminClient::new(format!("{}/api/", server.uri()), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_list_bare_array_with_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "p1", "name": "Tee", "price": 24.99, "category": "apparel", "stockQuantity": 4},
            {"_id": "p2", "name": "Mat", "price": "34.99", "category": "equipment"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server).await.with_token("tok-1");
    let products: Vec<Product> = api.list().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, "p1");
    assert_eq!(products[0].price, dec!(24.99));
    assert_eq!(products[1].stock_quantity, 0);
}

#[tokio::test]
async fn test_list_wrapped_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"_id": "c1", "name": "Apparel", "slug": "apparel"}]
        })))
        .mount(&server)
        .await;

    let categories: Vec<Category> = client(&server).await.list().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].slug, "apparel");
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server).await.get::<Order>("nope").await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
    assert_eq!(err.to_string(), "Resource not found: Order nope");
}

#[tokio::test]
async fn test_server_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "Database unavailable"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).await.list::<Order>().await.unwrap_err();
    assert_eq!(err.to_string(), "API returned 500: Database unavailable");
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/categories/c1"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .delete::<Category>("c1")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Api { status: 403, ref message } if message == "forbidden"));
}

#[tokio::test]
async fn test_update_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/orders/o1"))
        .and(body_partial_json(json!({"status": "shipped", "trackingNumber": "TRK1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "o1",
            "user": {"_id": "u1", "name": "Ana"},
            "totalAmount": 10,
            "status": "shipped",
            "trackingNumber": "TRK1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let order = Order {
        id: "o1".to_string(),
        user: gymadmin_core::types::UserSummary::default(),
        items: Vec::new(),
        total_amount: dec!(10),
        status: OrderStatus::Shipped,
        payment_status: gymadmin_core::PaymentStatus::Paid,
        shipping_address: gymadmin_core::types::ShippingAddress::default(),
        tracking_number: Some("TRK1".to_string()),
        created_at: None,
    };

    let saved = client(&server).await.update("o1", order).await.unwrap();
    assert_eq!(saved.status, OrderStatus::Shipped);
    assert_eq!(saved.user.name, "Ana");
}

#[tokio::test]
async fn test_unreachable_backend_is_http_error() {
    let api = HttpAdminClient::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
    let err = api.list::<Category>().await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}
