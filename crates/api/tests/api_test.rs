//! HTTP tests for the API router over a mock database.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use chrono::{NaiveDate, TimeZone, Utc};
use erp_api::{AppState, create_router};
use erp_db::entities::{
    erp_ac_tax, erp_ac_transaction_items, erp_ac_transactions, erp_hr_employees, user_meta,
};
use erp_shared::{AppConfig, JwtConfig, JwtService, NonceService};
use http_body_util::BodyExt;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Value};
use serde_json::json;
use tower::ServiceExt;

const SECRET: &str = "test-secret-key-for-router-tests";

fn config() -> AppConfig {
    serde_json::from_value(json!({
        "server": { "public_url": "http://erp.test" },
        "database": { "url": "postgres://unused" },
        "jwt": { "secret": SECRET },
        "admin": { "dashboard_url": "/admin/index" }
    }))
    .unwrap()
}

fn state(db: DatabaseConnection) -> AppState {
    AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(JwtService::new(JwtConfig {
            secret: SECRET.to_string(),
            access_token_expires_minutes: 5,
        })),
        nonce_service: Arc::new(NonceService::new(SECRET, 600)),
        config: Arc::new(config()),
    }
}

fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

fn token(state: &AppState, caps: &[&str]) -> String {
    state.jwt_service.generate_access_token(1, caps).unwrap()
}

async fn send(
    state: AppState,
    method: Method,
    uri: &str,
    bearer: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    create_router(state)
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

async fn json_body(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn transaction(id: i64) -> erp_ac_transactions::Model {
    erp_ac_transactions::Model {
        id,
        trans_type: "sales".to_string(),
        form_type: "invoice".to_string(),
        status: "awaiting_payment".to_string(),
        account_id: 1,
        user_id: 0,
        billing_address: String::new(),
        reference: "REF".to_string(),
        summary: String::new(),
        issue_date: NaiveDate::from_ymd_opt(2026, 3, 1),
        due_date: None,
        currency: "USD".to_string(),
        sub_total: dec!(145),
        total: dec!(155),
        due: dec!(155),
        trans_total: dec!(155),
        invoice_number: 12,
        invoice_format: "INV-{5}".to_string(),
        parent: 0,
        created_by: 1,
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap().into(),
    }
}

fn item(id: i64, transaction_id: i64) -> erp_ac_transaction_items::Model {
    erp_ac_transaction_items::Model {
        id,
        transaction_id,
        journal_id: 0,
        product_id: 0,
        account_id: 400,
        description: "Consulting".to_string(),
        qty: 1,
        unit_price: dec!(100),
        discount: dec!(0),
        tax: 1,
        tax_rate: dec!(10),
        tax_journal: 0,
        line_total: dec!(100),
        item_order: 0,
    }
}

#[tokio::test]
async fn test_health_is_public() {
    let response = send(state(empty_db()), Method::GET, "/health", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "erp-api");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let response = send(state(empty_db()), Method::GET, "/erp/accounting/sales", None, None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"], "missing_token");
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
    let response = send(
        state(empty_db()),
        Method::GET,
        "/erp/hrm/dashboard",
        Some("not-a-jwt"),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"], "invalid_token");
}

#[tokio::test]
async fn test_list_sets_total_headers() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![transaction(3)]])
        .append_query_results([vec![item(1, 3)]])
        .append_query_results([[BTreeMap::from([("num_items", Value::BigInt(Some(11)))])]])
        .into_connection();
    let state = state(db);
    let token = token(&state, &["read"]);

    let response = send(
        state,
        Method::GET,
        "/erp/accounting/sales?page=1&per_page=10",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-total"], "11");
    assert_eq!(response.headers()["x-total-pages"], "2");
    let body = json_body(response).await;
    assert_eq!(body["data"][0]["invoice"], "INV-00012");
    assert_eq!(body["data"][0]["total"], json!(155.0));
    assert_eq!(body["meta"]["total"], 11);
}

#[tokio::test]
async fn test_get_sale_with_items() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![transaction(7)]])
        .append_query_results([vec![item(1, 7)]])
        .into_connection();
    let state = state(db);
    let token = token(&state, &["read"]);

    let response = send(state, Method::GET, "/erp/accounting/sales/7", Some(&token), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["id"], 7);
    assert_eq!(body["items"][0]["description"], "Consulting");
    assert_eq!(body["_links"]["self"][0]["href"], "http://erp.test/erp/accounting/sales/7");
}

#[tokio::test]
async fn test_get_sale_zero_is_not_found() {
    let state = state(empty_db());
    let token = token(&state, &["read"]);

    let response = send(state, Method::GET, "/erp/accounting/sales/0", Some(&token), None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "rest_sale_invalid_id");
    assert_eq!(body["message"], "Invalid resource id.");
}

#[tokio::test]
async fn test_delete_unknown_propagates_store_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();
    let state = state(db);
    let token = token(&state, &["read"]);

    let response = send(state, Method::DELETE, "/erp/accounting/sales/5", Some(&token), None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"], "erp_ac_transaction_not_found");
}

#[tokio::test]
async fn test_delete_existing_is_no_content() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
        ])
        .into_connection();
    let state = state(db);
    let token = token(&state, &["read"]);

    let response = send(state, Method::DELETE, "/erp/accounting/sales/5", Some(&token), None).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_create_with_bad_date_is_rejected() {
    let state = state(empty_db());
    let token = token(&state, &["read"]);

    let response = send(
        state,
        Method::POST,
        "/erp/accounting/sales",
        Some(&token),
        Some(json!({ "issue_date": "next tuesday", "items": [] })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "rest_sale_invalid_date");
}

fn tax_rows() -> Vec<erp_ac_tax::Model> {
    vec![erp_ac_tax::Model {
        id: 1,
        name: "VAT".to_string(),
        rate: dec!(10),
    }]
}

fn id_row(id: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("id", Value::BigInt(Some(id)))])
}

fn worked_example() -> serde_json::Value {
    json!({
        "form_type": "invoice",
        "status": "awaiting_payment",
        "account_id": 1,
        "issue_date": "2026-03-01",
        "items": [
            {"account_id": 400, "qty": 1, "unit_price": "100.00", "tax": 1},
            {"account_id": 400, "qty": 1, "unit_price": "50.00", "discount": "5"}
        ]
    })
}

#[tokio::test]
async fn test_create_sale_is_created_with_location() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([tax_rows()])
        .append_query_results([[BTreeMap::from([("max_invoice", Value::BigInt(Some(11)))])]])
        .append_query_results([vec![transaction(12)]])
        .append_query_results([[id_row(31)]])
        .append_query_results([vec![transaction(12)]])
        .append_query_results([vec![item(31, 12)]])
        .into_connection();
    let log = db.clone();
    let state = state(db);
    let token = token(&state, &["read"]);

    let response = send(
        state,
        Method::POST,
        "/erp/accounting/sales?include=customer",
        Some(&token),
        Some(worked_example()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers()[header::LOCATION],
        "http://erp.test/erp/accounting/sales/12"
    );
    let body = json_body(response).await;
    assert_eq!(body["id"], 12);
    assert_eq!(body["invoice"], "INV-00012");
    assert_eq!(body["sub_total"], json!(145.0));
    assert_eq!(body["trans_total"], json!(155.0));
    assert_eq!(body["customer"], serde_json::Value::Null);

    let written = format!("{:?}", log.into_transaction_log());
    assert!(written.contains("INSERT INTO"));
    assert!(written.contains("Decimal(Some(145.00))"));
    assert!(written.contains("Decimal(Some(155.00))"));
}

#[tokio::test]
async fn test_update_sale_replaces_items() {
    let mut updated = transaction(12);
    updated.status = "paid".to_string();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![transaction(12)]])
        .append_query_results([vec![item(31, 12)]])
        .append_query_results([tax_rows()])
        .append_query_results([vec![updated.clone()]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([[id_row(41)]])
        .append_query_results([vec![updated]])
        .append_query_results([vec![item(41, 12)]])
        .into_connection();
    let state = state(db);
    let token = token(&state, &["read"]);
    let mut request = worked_example();
    request["status"] = json!("paid");

    let response = send(
        state,
        Method::PUT,
        "/erp/accounting/sales/12",
        Some(&token),
        Some(request),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers()[header::LOCATION],
        "http://erp.test/erp/accounting/sales/12"
    );
    let body = json_body(response).await;
    assert_eq!(body["status"], "paid");
    assert_eq!(body["total"], json!(155.0));
    assert_eq!(body["items"][0]["id"], 41);
}

#[tokio::test]
async fn test_create_with_overflowing_amounts_is_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([tax_rows()])
        .into_connection();
    let state = state(db);
    let token = token(&state, &["read"]);
    let huge = json!({"unit_price": "79228162514264337593543950335"});

    let response = send(
        state,
        Method::POST,
        "/erp/accounting/sales",
        Some(&token),
        Some(json!({ "items": [huge.clone(), huge] })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "rest_sale_invalid_amount");
}

#[tokio::test]
async fn test_options_returns_schema() {
    let state = state(empty_db());
    let token = token(&state, &["read"]);

    let response = send(state, Method::OPTIONS, "/erp/accounting/sales/3", Some(&token), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["title"], "sale");
    assert_eq!(body["$schema"], "http://json-schema.org/draft-04/schema#");
}

#[tokio::test]
async fn test_menu_depends_on_capability() {
    let state = state(empty_db());
    let admin = token(&state, &["manage_options"]);
    let reader = token(&state, &["read"]);

    let body = json_body(send(state.clone(), Method::GET, "/erp/admin/menu", Some(&admin), None).await).await;
    let slugs: Vec<&str> = body["navigation"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|entry| entry["slug"].as_str())
        .collect();
    assert!(slugs.contains(&"erp-dashboard"));
    assert!(!slugs.contains(&"edit.php"));
    assert!(body["hidden"].as_array().unwrap().contains(&json!("users.php")));

    let body = json_body(send(state, Method::GET, "/erp/admin/menu", Some(&reader), None).await).await;
    assert!(
        body["navigation"]
            .as_array()
            .unwrap()
            .iter()
            .all(|entry| entry["slug"] != "erp-dashboard")
    );
}

#[tokio::test]
async fn test_bar_links_carry_nonce() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_meta::Model {
            user_id: 1,
            meta_key: "_erp_mode".to_string(),
            meta_value: "accounting".to_string(),
        }]])
        .into_connection();
    let state = state(db);
    let token = token(&state, &["manage_options"]);

    let body = json_body(send(state, Method::GET, "/erp/admin/bar", Some(&token), None).await).await;

    assert_eq!(body["current"], "accounting");
    assert_eq!(body["nodes"][0]["title"], "ERP Mode: Accounting");
    let href = body["nodes"][1]["href"].as_str().unwrap();
    assert!(href.starts_with("/admin/index?erp-mode=hrm&erp_mode_nonce="));
}

#[tokio::test]
async fn test_mode_switch_redirects() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let state = state(db);
    let token = token(&state, &["manage_options"]);
    let nonce = state.nonce_service.create("erp_mode_nonce", 1).unwrap();

    let response = send(
        state,
        Method::GET,
        &format!("/erp/hrm/dashboard?erp-mode=crm&erp_mode_nonce={nonce}"),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/admin/index");
}

#[tokio::test]
async fn test_mode_switch_applies_on_sales_routes() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let log = db.clone();
    let state = state(db);
    let token = token(&state, &["manage_options"]);
    let nonce = state.nonce_service.create("erp_mode_nonce", 1).unwrap();

    let response = send(
        state,
        Method::GET,
        &format!("/erp/accounting/sales?erp-mode=accounting&erp_mode_nonce={nonce}"),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/admin/index");
    assert!(format!("{:?}", log.into_transaction_log()).contains("_erp_mode"));
}

#[tokio::test]
async fn test_mode_switch_with_bad_nonce_falls_through() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<erp_hr_employees::Model>::new()])
        .append_query_results([Vec::<erp_hr_employees::Model>::new()])
        .into_connection();
    let state = state(db);
    let token = token(&state, &["manage_options"]);

    let response = send(
        state,
        Method::GET,
        "/erp/hrm/dashboard/widgets/birthday?erp-mode=crm&erp_mode_nonce=forged",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["kind"], "birthday");
    assert_eq!(body["content"]["today"]["empty_message"], "No one has birthday today!");
}

#[tokio::test]
async fn test_unknown_widget_is_not_found() {
    let state = state(empty_db());
    let token = token(&state, &["read"]);

    let response = send(state, Method::GET, "/erp/hrm/dashboard/widgets/weather", Some(&token), None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"], "rest_widget_invalid_id");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let state = state(empty_db());
    let token = token(&state, &["read"]);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/erp/accounting/sales")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"items\": ["))
        .unwrap();

    let response = create_router(state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "bad_request");
}
