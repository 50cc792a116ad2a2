//! Requests rejected before any query runs; the pool here never connects.

mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use consultant_marketplace_api::routes::create_app;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

fn app() -> Router {
    create_app(common::offline_state())
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn categories_cannot_be_created() {
    let (status, body) = send(json_request("POST", "/api/categories", json!({ "name": "Astrology" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Categories are predefined. Please use the available categories."
    );
}

#[tokio::test]
async fn unknown_paths_are_json_404s() {
    let (status, body) = send(get("/api/unknown")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn review_rating_must_be_between_one_and_five() {
    let payload = json!({
        "booking_id": Uuid::new_v4(),
        "client_id": Uuid::new_v4(),
        "rating": 6,
    });
    let (status, body) = send(json_request("POST", "/api/reviews", payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Rating must be between 1 and 5");
}

#[tokio::test]
async fn payment_lookup_needs_an_identifier() {
    let (status, body) = send(get("/api/payments")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Transaction ID or Booking ID is required");
}

#[tokio::test]
async fn refund_needs_an_identifier() {
    let (status, _) = send(json_request("PUT", "/api/payments", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn user_lookup_needs_id_or_email() {
    let (status, body) = send(get("/api/users")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User ID or email is required");
}

#[tokio::test]
async fn booking_without_consultant_is_a_bad_request() {
    let payload = json!({ "client_id": Uuid::new_v4() });
    let (status, body) = send(json_request("POST", "/api/bookings", payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("consultant_id"));
}

#[tokio::test]
async fn booking_yourself_is_rejected() {
    let id = Uuid::new_v4();
    let payload = json!({ "client_id": id, "consultant_id": id });
    let (status, _) = send(json_request("POST", "/api/bookings", payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let request = Request::post("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unknown_category_filter_is_rejected() {
    let (status, body) = send(get("/api/consultants?category=astrology")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown category 'astrology'");
}

#[tokio::test]
async fn unknown_payment_method_is_rejected() {
    let payload = json!({
        "booking_id": Uuid::new_v4(),
        "amount": 99,
        "payment_method": "cheque",
        "payment_details": {},
    });
    let (status, _) = send(json_request("POST", "/api/payments", payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_routes_reject_malformed_ids() {
    let payload = json!({ "admin_id": Uuid::new_v4() });
    let (status, body) = send(json_request(
        "POST",
        "/api/admin/consultants/not-a-uuid/approve",
        payload,
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
