//! REST client integration tests
//!
//! Each test starts a throwaway axum backend on a random local port and
//! points a `MillApiClient` at it.

use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use uuid::Uuid;

use rice_mill_client::{ClientError, MillApiClient, Session};
use shared::{
    BostaLedger, BostaSize, NewEmployee, NewPaddyPurchase, NewPayment, Pagination, PaymentMethod,
    PaymentParty, ProductCategory, Role, UserProfile,
};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Serve `app` under `/api` and return the base URL
async fn spawn_backend(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, Router::new().nest("/api", app))
            .await
            .unwrap();
    });
    format!("http://{}/api", addr)
}

fn client(base_url: String) -> MillApiClient {
    MillApiClient::with_base_url(base_url, Arc::new(Session::new("test-token")))
}

fn manager_session() -> Session {
    Session::new("test-token").with_profile(UserProfile {
        id: Uuid::new_v4(),
        name: "Karim".to_string(),
        email: "karim@mill.com.bd".to_string(),
        role: Role::Manager,
        mill_id: Some(Uuid::new_v4()),
    })
}

// ============================================================================
// Stock
// ============================================================================

#[tokio::test]
async fn test_fetch_stock_missing_category_is_empty() {
    let app = Router::new().route(
        "/stock",
        get(|| async {
            Json(json!({
                "paddy": { "Miniket": { "totalKg": 1500, "totalBosta": 30 } },
                "bran": { "Fine": { "totalKg": 0, "totalBosta": 0 } }
            }))
        }),
    );
    let api = client(spawn_backend(app).await);

    let stock = api.fetch_stock().await.unwrap();

    assert_eq!(stock.category_total(ProductCategory::Paddy).total_kg, dec("1500"));
    assert!(stock.category(ProductCategory::Rice).is_empty());
    assert!(stock.active_rows(ProductCategory::Bran).is_empty());
}

#[tokio::test]
async fn test_fetch_stock_unwraps_data_envelope() {
    let app = Router::new().route(
        "/stock",
        get(|| async {
            Json(json!({
                "data": {
                    "rice": [
                        { "type": "Miniket", "totalKg": 500, "totalBosta": 10 },
                        { "type": "Miniket", "totalKg": "250.5", "totalBosta": 5 }
                    ]
                }
            }))
        }),
    );
    let api = client(spawn_backend(app).await);

    let stock = api.fetch_stock().await.unwrap();
    let rows = stock.active_rows(ProductCategory::Rice);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, "Miniket");
    assert_eq!(rows[0].1.total_kg, dec("750.5"));
    assert_eq!(rows[0].1.total_bosta, dec("15"));
}

#[tokio::test]
async fn test_fetch_stock_malformed_category_degrades() {
    let app = Router::new().route(
        "/stock",
        get(|| async {
            Json(json!({
                "paddy": "not a map",
                "rice": { "Najirshail": { "totalKg": 100, "totalBosta": 4 } }
            }))
        }),
    );
    let api = client(spawn_backend(app).await);

    let stock = api.fetch_stock().await.unwrap();

    assert!(stock.category(ProductCategory::Paddy).is_empty());
    assert_eq!(stock.category_total(ProductCategory::Rice).total_kg, dec("100"));
}

#[tokio::test]
async fn test_fetch_stock_non_object_body_is_decode_error() {
    let app = Router::new().route("/stock", get(|| async { Json(json!([1, 2, 3])) }));
    let api = client(spawn_backend(app).await);

    let error = api.fetch_stock().await.unwrap_err();

    assert!(matches!(error, ClientError::Decode(_)));
    assert_eq!(error.user_message("load stock").message_en, "Failed to load stock");
}

// ============================================================================
// Status mapping and auth
// ============================================================================

#[tokio::test]
async fn test_unauthorized_maps_to_session_error() {
    let app = Router::new().route(
        "/stock",
        get(|| async { (StatusCode::UNAUTHORIZED, "token expired") }),
    );
    let api = client(spawn_backend(app).await);

    let error = api.fetch_stock().await.unwrap_err();

    assert!(matches!(error, ClientError::Unauthorized));
    assert_eq!(error.code(), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let app = Router::new().route(
        "/farmers",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "db down") }),
    );
    let api = client(spawn_backend(app).await);

    let error = api.list_farmers(&Pagination::default()).await.unwrap_err();

    match error {
        ClientError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "db down");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_profile_sends_bearer_token() {
    let app = Router::new().route(
        "/auth/profile",
        get(|headers: HeaderMap| async move {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            if auth != "Bearer test-token" {
                return Err(StatusCode::UNAUTHORIZED);
            }
            Ok(Json(json!({
                "data": {
                    "id": "6f1c2d3e-4b5a-4c6d-8e7f-9a0b1c2d3e4f",
                    "name": "Rahim Uddin",
                    "email": "rahim@mill.com.bd",
                    "role": "admin",
                    "millId": null
                }
            })))
        }),
    );
    let api = client(spawn_backend(app).await);

    let profile = api.fetch_profile().await.unwrap();

    assert_eq!(profile.name, "Rahim Uddin");
    assert_eq!(profile.role, Role::Admin);
    assert!(profile.mill_id.is_none());
}

// ============================================================================
// Lists and records
// ============================================================================

#[tokio::test]
async fn test_list_farmers_accepts_bare_array() {
    let app = Router::new().route(
        "/farmers",
        get(|| async {
            Json(json!([{
                "id": "0b8a7c6d-5e4f-4a3b-9c2d-1e0f9a8b7c6d",
                "name": "Abdul Karim",
                "phone": "01712345678",
                "address": "Dinajpur",
                "nationalId": null,
                "dueAmount": "12500.50",
                "createdAt": "2026-01-15T08:30:00Z"
            }]))
        }),
    );
    let api = client(spawn_backend(app).await);

    let farmers = api.list_farmers(&Pagination::default()).await.unwrap();

    assert_eq!(farmers.len(), 1);
    assert_eq!(farmers[0].due_amount, dec("12500.50"));
}

#[tokio::test]
async fn test_record_purchase_posts_flat_sack_list() {
    let app = Router::new().route(
        "/purchases",
        post(|Json(body): Json<Value>| async move {
            let sacks = body["bostas"].as_array().cloned().unwrap_or_default();
            let total: f64 = sacks
                .iter()
                .filter_map(|s| s["weightKg"].as_f64())
                .sum();
            Json(json!({
                "data": {
                    "id": "1d2c3b4a-5f6e-4d7c-8b9a-0f1e2d3c4b5a",
                    "farmerId": body["farmerId"],
                    "paddyType": body["paddyType"],
                    "totalKg": total,
                    "totalBosta": sacks.len(),
                    "totalPrice": 0,
                    "paidAmount": 0,
                    "dueAmount": 0,
                    "purchaseDate": body["purchaseDate"],
                    "createdAt": "2026-03-01T10:00:00Z"
                }
            }))
        }),
    );
    let api = client(spawn_backend(app).await);

    let purchase = NewPaddyPurchase {
        farmer_id: Uuid::new_v4(),
        paddy_type: "Miniket".to_string(),
        bosta_size: BostaSize::Kg50,
        bostas: BostaLedger::from_weights([dec("50"), dec("49.5"), dec("51")]),
        price_per_kg: dec("32"),
        paid_amount: dec("0"),
        purchase_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        note: None,
    };

    let stored = api.record_purchase(&purchase).await.unwrap();

    assert_eq!(stored.total_bosta, 3);
    assert_eq!(stored.total_kg, dec("150.5"));
}

#[tokio::test]
async fn test_record_purchase_rejects_unweighed_sack() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        "/purchases",
        post(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { StatusCode::CREATED }
        }),
    );
    let api = client(spawn_backend(app).await);

    let mut bostas = BostaLedger::from_weights([dec("50")]);
    bostas.add_bosta();
    let purchase = NewPaddyPurchase {
        farmer_id: Uuid::new_v4(),
        paddy_type: "Miniket".to_string(),
        bosta_size: BostaSize::Kg50,
        bostas,
        price_per_kg: dec("32"),
        paid_amount: dec("0"),
        purchase_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        note: None,
    };

    let error = api.record_purchase(&purchase).await.unwrap_err();

    assert!(matches!(error, ClientError::Validation(_)));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Payments and permissions
// ============================================================================

#[tokio::test]
async fn test_payment_over_due_rejected_before_request() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        "/farmers/:id/payments",
        post(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { StatusCode::CREATED }
        }),
    );
    let api = client(spawn_backend(app).await);

    let payment = NewPayment {
        amount: dec("5000"),
        method: PaymentMethod::Cash,
        paid_on: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        note: None,
    };

    let error = api
        .record_payment(PaymentParty::Farmer, Uuid::new_v4(), &payment, dec("4000"))
        .await
        .unwrap_err();

    assert!(matches!(error, ClientError::Validation(_)));
    assert_eq!(
        error.user_message("record payment").message_en,
        "Payment amount cannot exceed the due amount"
    );
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_customer_payment_posts_to_customer_route() {
    let app = Router::new().route(
        "/customers/:id/payments",
        post(|Json(body): Json<Value>| async move {
            Json(json!({
                "id": "9e8d7c6b-5a4f-4e3d-8c2b-1a0f9e8d7c6b",
                "party": "customer",
                "partyId": "2a3b4c5d-6e7f-4a8b-9c0d-1e2f3a4b5c6d",
                "amount": body["amount"],
                "method": body["method"],
                "paidOn": body["paidOn"],
                "note": null,
                "createdAt": "2026-03-02T09:00:00Z"
            }))
        }),
    );
    let api = client(spawn_backend(app).await);

    let payment = NewPayment {
        amount: dec("2500"),
        method: PaymentMethod::MobileBanking,
        paid_on: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        note: None,
    };

    let stored = api
        .record_payment(PaymentParty::Customer, Uuid::new_v4(), &payment, dec("2500"))
        .await
        .unwrap();

    assert_eq!(stored.party, PaymentParty::Customer);
    assert_eq!(stored.amount, dec("2500"));
    assert_eq!(stored.method, PaymentMethod::MobileBanking);
}

#[tokio::test]
async fn test_manager_cannot_create_employee() {
    let api = MillApiClient::with_base_url(
        "http://127.0.0.1:9".to_string(),
        Arc::new(manager_session()),
    );

    let employee = NewEmployee {
        name: "Jamal".to_string(),
        phone: "01812345678".to_string(),
        designation: "Operator".to_string(),
        monthly_salary: dec("12000"),
        joined_on: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
    };

    let error = api.create_employee(&employee).await.unwrap_err();

    assert!(matches!(error, ClientError::Forbidden(_)));
    assert_eq!(error.code(), "INSUFFICIENT_PERMISSIONS");
}
