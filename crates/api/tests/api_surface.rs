//! API surface tests that must never touch either store.
//!
//! The state is built over lazily-connected pools pointed at an unroutable
//! address, so any request that reaches a store fails loudly. The paths
//! exercised here are exactly the ones guaranteed to be rejected before the
//! store: identity mismatches on replace and invalid creation payloads.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use tower::ServiceExt;

use dualstore_api::config::AppConfig;
use dualstore_api::state::AppState;
use dualstore_api::{db, routes};

fn test_state() -> AppState {
    let config = AppConfig {
        customer_database_url: SecretString::from("postgres://postgres@127.0.0.1:1/customers"),
        order_database_url: SecretString::from("postgres://postgres@127.0.0.1:1/orders"),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
    };
    let customer_pool = db::create_pool(&config.customer_database_url).unwrap();
    let order_pool = db::create_pool(&config.order_database_url).unwrap();
    AppState::new(config, customer_pool, order_pool)
}

async fn send(request: Request<Body>) -> (StatusCode, String) {
    let app = routes::router().with_state(test_state());
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_liveness_does_not_depend_on_the_stores() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_put_order_with_mismatched_identity_is_rejected() {
    let body = r#"{"id":8,"customerId":5,"productName":"Widget","amount":10.00}"#;
    let (status, _) = send(json_request("PUT", "/api/Orders/7", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_customer_with_mismatched_identity_is_rejected() {
    let body = r#"{"id":4,"name":"Ada","email":"ada@example.com"}"#;
    let (status, _) = send(json_request("PUT", "/api/Customers/3", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_post_order_without_valid_customer_id_is_rejected() {
    let body = r#"{"customerId":0,"productName":"Widget","amount":10.00}"#;
    let (status, message) = send(json_request("POST", "/api/Orders", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message, "Valid CustomerId is required.");
}

#[tokio::test]
async fn test_post_order_with_blank_product_name_is_rejected() {
    let body = r#"{"customerId":5,"productName":"   ","amount":10.00}"#;
    let (status, message) = send(json_request("POST", "/api/Orders", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message, "Product name is required.");
}

#[tokio::test]
async fn test_post_order_with_zero_amount_is_rejected() {
    let body = r#"{"customerId":5,"productName":"Widget","amount":0}"#;
    let (status, message) = send(json_request("POST", "/api/Orders", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message, "Amount must be greater than zero.");
}

#[tokio::test]
async fn test_post_order_with_negative_amount_is_rejected() {
    let body = r#"{"customerId":5,"productName":"Widget","amount":-10.00}"#;
    let (status, message) = send(json_request("POST", "/api/Orders", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message, "Amount must be greater than zero.");
}
