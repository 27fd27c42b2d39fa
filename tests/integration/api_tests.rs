//! API integration tests
//!
//! Require a running server with a migrated database and `JWT_SECRET` set to
//! the server's secret.

use chrono::{Duration, Local, Utc};
use reqwest::Client;
use rentdesk_server::models::{Role, UserClaims};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to mint a token the server will accept
fn token(role: Role, user_id: i32) -> String {
    let secret = std::env::var("JWT_SECRET")
        .unwrap_or_else(|_| "change-this-secret-in-production".to_string());
    let now = Utc::now();
    UserClaims {
        sub: format!("user{}", user_id),
        user_id,
        role,
        exp: (now + Duration::hours(1)).timestamp(),
        iat: now.timestamp(),
    }
    .create_token(&secret)
    .expect("Failed to create token")
}

fn day_from_today(days: i64) -> String {
    (Local::now().date_naive() + Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_rules_are_public() {
    let client = Client::new();

    let response = client
        .get(format!("{}/availability/rules", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["advance_booking_days"].is_number());
    assert!(body["minimum_start_date"].is_string());
    assert!(body["closures"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_calendar_invalid_month() {
    let client = Client::new();

    let response = client
        .get(format!("{}/availability/calendar?year=2024&month=13", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_customer_cannot_create_closure() {
    let client = Client::new();

    let response = client
        .post(format!("{}/closures", BASE_URL))
        .header("Authorization", format!("Bearer {}", token(Role::Customer, 2)))
        .json(&json!({
            "date_from": "2030-01-01",
            "date_to": "2030-01-02"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_reversed_closure_is_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/closures", BASE_URL))
        .header("Authorization", format!("Bearer {}", token(Role::Admin, 1)))
        .json(&json!({
            "date_from": "2030-01-05",
            "date_to": "2030-01-01"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_checkout_closure_end_day_returns_notice() {
    let client = Client::new();
    let admin = token(Role::Admin, 1);

    // Closure far enough ahead to clear any configured lead time
    let closure_day = day_from_today(400);
    let response = client
        .post(format!("{}/closures", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({
            "date_from": closure_day,
            "date_to": closure_day,
            "checkout_permitted": true,
            "reason": "Stocktake"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let closure: Value = response.json().await.expect("Failed to parse response");
    let closure_id = closure["id"].as_i64().expect("No closure ID");

    let response = client
        .post(format!("{}/availability/check", BASE_URL))
        .json(&json!({
            "start_date": day_from_today(398),
            "end_date": closure_day
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["valid"], true);
    assert_eq!(body["checkout_notice"]["chosen_date"], closure_day);
    assert_eq!(body["checkout_notice"]["implied_return_date"], day_from_today(401));

    // Starting on the same day is refused
    let response = client
        .post(format!("{}/availability/check", BASE_URL))
        .json(&json!({
            "start_date": closure_day,
            "end_date": day_from_today(402)
        }))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["valid"], false);
    assert_eq!(body["reason"], "shop_closed");

    let response = client
        .delete(format!("{}/closures/{}", BASE_URL, closure_id))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_booking_capacity_and_cancel() {
    let client = Client::new();
    let admin = token(Role::Admin, 1);
    let customer = token(Role::Customer, 42);

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({
            "name": "Test snowboard",
            "category": "winter",
            "daily_rate": "25.00",
            "quantity": 1
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let equipment: Value = response.json().await.expect("Failed to parse response");
    let equipment_id = equipment["id"].as_i64().expect("No equipment ID");

    let booking = json!({
        "equipment_id": equipment_id,
        "start_date": day_from_today(500),
        "end_date": day_from_today(503)
    });

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", customer))
        .json(&booking)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.expect("Failed to parse response");
    let booking_id = created["booking"]["id"].as_i64().expect("No booking ID");
    assert_eq!(created["booking"]["status"], "pending");

    // The only unit is taken
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", customer))
        .json(&booking)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let response = client
        .post(format!("{}/bookings/{}/cancel", BASE_URL, booking_id))
        .header("Authorization", format!("Bearer {}", customer))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "cancelled");

    // A second cancel finds nothing left to change
    let response = client
        .post(format!("{}/bookings/{}/cancel", BASE_URL, booking_id))
        .header("Authorization", format!("Bearer {}", customer))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Another customer cannot see it
    let response = client
        .get(format!("{}/bookings/{}", BASE_URL, booking_id))
        .header("Authorization", format!("Bearer {}", token(Role::Customer, 43)))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_unit_is_busy_on_its_return_day() {
    let client = Client::new();
    let admin = token(Role::Admin, 1);
    let customer = token(Role::Customer, 42);

    let response = client
        .post(format!("{}/closures", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({
            "date_from": day_from_today(600),
            "date_to": day_from_today(602),
            "checkout_permitted": true
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let closure: Value = response.json().await.expect("Failed to parse response");
    let closure_id = closure["id"].as_i64().expect("No closure ID");

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({
            "name": "Test kayak",
            "daily_rate": "40.00",
            "quantity": 1
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let equipment: Value = response.json().await.expect("Failed to parse response");
    let equipment_id = equipment["id"].as_i64().expect("No equipment ID");

    // Ends on a checkout-permitted closure day, back the day after
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", customer))
        .json(&json!({
            "equipment_id": equipment_id,
            "start_date": day_from_today(597),
            "end_date": day_from_today(602)
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(created["booking"]["return_date"], day_from_today(603));
    assert_eq!(created["checkout_notice"]["implied_return_date"], day_from_today(603));

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", customer))
        .json(&json!({
            "equipment_id": equipment_id,
            "start_date": day_from_today(603),
            "end_date": day_from_today(605)
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", customer))
        .json(&json!({
            "equipment_id": equipment_id,
            "start_date": day_from_today(604),
            "end_date": day_from_today(606)
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .delete(format!("{}/closures/{}", BASE_URL, closure_id))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_booking_requires_token() {
    let client = Client::new();

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&json!({
            "equipment_id": 1,
            "start_date": day_from_today(10),
            "end_date": day_from_today(12)
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}
