use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use hangar_api::{app, AppState};
use hangar_catalog::{Category, InMemoryPartCatalog, Manufacturer, Part};
use hangar_core::payment::{
    LocalPaymentGateway, PayOrderRequest, PayOrderResponse, PaymentError, PaymentGateway,
};
use hangar_order::InMemoryOrderRepository;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    router: Router,
    orders: Arc<InMemoryOrderRepository>,
    parts: Vec<Part>,
}

async fn setup_with(payments: Arc<dyn PaymentGateway>, request_timeout: Duration) -> TestApp {
    let catalog = Arc::new(InMemoryPartCatalog::new());
    let parts = vec![
        Part::new("Aurora porthole", 100, Category::Porthole).with_manufacturer(Manufacturer {
            name: "Helios Fabrication".to_string(),
            country: "Japan".to_string(),
            website: "https://helios.example".to_string(),
        }),
        Part::new("Nova wing", 250, Category::Wing).with_tags(["carbon", "certified"]),
        Part::new("Comet thruster", 9_000, Category::Engine),
    ];
    for part in &parts {
        catalog.insert(part.clone()).await.unwrap();
    }

    let orders = Arc::new(InMemoryOrderRepository::new());
    let state = AppState::new(catalog, payments, orders.clone(), request_timeout);

    TestApp {
        router: app(state),
        orders,
        parts,
    }
}

async fn setup_with_gateway(payments: Arc<dyn PaymentGateway>) -> TestApp {
    setup_with(payments, Duration::from_secs(5)).await
}

async fn setup() -> TestApp {
    setup_with_gateway(Arc::new(LocalPaymentGateway::new())).await
}

async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

fn assert_error(body: &Value, status: StatusCode) {
    assert_eq!(body["code"], json!(status.as_u16()));
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_order_pay_then_cancel_flow() {
    let app = setup().await;
    let user_uuid = Uuid::new_v4();

    let (status, created) = send(
        &app,
        Method::POST,
        "/orders",
        Some(json!({
            "user_uuid": user_uuid,
            "part_uuids": [app.parts[0].uuid, app.parts[1].uuid],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["total_price_minor"], json!(350));
    let order_uuid = created["order_uuid"].as_str().unwrap().to_string();

    let (status, order) = send(&app, Method::GET, &format!("/orders/{}", order_uuid), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], json!("PENDING_PAYMENT"));
    assert_eq!(order["user_uuid"], json!(user_uuid));
    assert!(order["transaction_uuid"].is_null());

    let (status, paid) = send(
        &app,
        Method::POST,
        &format!("/orders/{}/pay", order_uuid),
        Some(json!({ "payment_method": "CARD" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let transaction_uuid = paid["transaction_uuid"].as_str().unwrap().to_string();
    assert!(Uuid::parse_str(&transaction_uuid).is_ok());

    let (_, order) = send(&app, Method::GET, &format!("/orders/{}", order_uuid), None).await;
    assert_eq!(order["status"], json!("PAID"));
    assert_eq!(order["transaction_uuid"], json!(transaction_uuid));
    assert_eq!(order["payment_method"], json!("CARD"));
    assert_eq!(order["total_price_minor"], json!(350));

    let cancel_uri = format!("/orders/{}/cancel", order_uuid);
    let (status, body) = send(&app, Method::POST, &cancel_uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("already paid"));

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/orders/{}/pay", order_uuid),
        Some(json!({ "payment_method": "CARD" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_part_is_rejected_and_not_persisted() {
    let app = setup().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/orders",
        Some(json!({
            "user_uuid": Uuid::new_v4(),
            "part_uuids": [
                app.parts[0].uuid,
                "ffffffff-ffff-ffff-ffff-ffffffffffff",
                app.parts[1].uuid,
            ],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_error(&body, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], json!("missing specified part uuids"));
    assert!(body.get("order_uuid").is_none());
    assert!(app.orders.is_empty().await);
}

#[tokio::test]
async fn test_cancel_pending_order() {
    let app = setup().await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/orders",
        Some(json!({ "user_uuid": Uuid::new_v4(), "part_uuids": [app.parts[2].uuid] })),
    )
    .await;
    let order_uuid = created["order_uuid"].as_str().unwrap().to_string();

    let cancel_uri = format!("/orders/{}/cancel", order_uuid);
    let (status, order) = send(&app, Method::POST, &cancel_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], json!("CANCELLED"));
    assert_eq!(order["total_price_minor"], json!(9_000));

    let (status, body) = send(&app, Method::POST, &cancel_uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], json!("order already cancelled"));

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/orders/{}/pay", order_uuid),
        Some(json!({ "payment_method": "SBP" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], json!("order cancelled"));
}

#[tokio::test]
async fn test_unknown_order_is_not_found() {
    let app = setup().await;
    let missing = Uuid::new_v4();

    let (status, body) = send(&app, Method::GET, &format!("/orders/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::POST, &format!("/orders/{}/cancel", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/orders/{}/pay", missing),
        Some(json!({ "payment_method": "CARD" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_input_is_unprocessable() {
    let app = setup().await;

    let (status, body) = send(&app, Method::GET, "/orders/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_error(&body, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        Method::POST,
        "/orders",
        Some(json!({ "user_uuid": "user-1", "part_uuids": [app.parts[0].uuid] })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        Method::POST,
        "/orders",
        Some(json!({ "user_uuid": Uuid::new_v4(), "part_uuids": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let garbled = json!({ "part_uuids": "nope" });
    let (status, body) = send(&app, Method::POST, "/orders", Some(garbled)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_error(&body, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app.orders.is_empty().await);
}

#[tokio::test]
async fn test_invalid_payment_method() {
    let app = setup().await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/orders",
        Some(json!({ "user_uuid": Uuid::new_v4(), "part_uuids": [app.parts[0].uuid] })),
    )
    .await;
    let order_uuid = created["order_uuid"].as_str().unwrap().to_string();

    for method in ["BITCOIN", "UNSPECIFIED"] {
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/orders/{}/pay", order_uuid),
            Some(json!({ "payment_method": method })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], json!("invalid payment method"));
    }

    let (_, order) = send(&app, Method::GET, &format!("/orders/{}", order_uuid), None).await;
    assert_eq!(order["status"], json!("PENDING_PAYMENT"));
}

struct DownGateway;

#[async_trait]
impl PaymentGateway for DownGateway {
    async fn pay(&self, _request: PayOrderRequest) -> Result<PayOrderResponse, PaymentError> {
        Err(PaymentError::Unavailable("connection reset".to_string()))
    }
}

#[tokio::test]
async fn test_payment_outage_is_bad_gateway() {
    let app = setup_with_gateway(Arc::new(DownGateway)).await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/orders",
        Some(json!({ "user_uuid": Uuid::new_v4(), "part_uuids": [app.parts[0].uuid] })),
    )
    .await;
    let order_uuid = created["order_uuid"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/orders/{}/pay", order_uuid),
        Some(json!({ "payment_method": "CARD" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_error(&body, StatusCode::BAD_GATEWAY);

    let (_, order) = send(&app, Method::GET, &format!("/orders/{}", order_uuid), None).await;
    assert_eq!(order["status"], json!("PENDING_PAYMENT"));
}

#[tokio::test]
async fn test_undecodable_path_id_is_unprocessable() {
    let app = setup().await;

    for (method, uri) in [
        (Method::GET, "/orders/%FF%FE"),
        (Method::POST, "/orders/%FF%FE/cancel"),
        (Method::GET, "/parts/%FF%FE"),
    ] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", uri);
        assert_error(&body, StatusCode::UNPROCESSABLE_ENTITY);
    }
}

struct StalledGateway;

#[async_trait]
impl PaymentGateway for StalledGateway {
    async fn pay(&self, request: PayOrderRequest) -> Result<PayOrderResponse, PaymentError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        LocalPaymentGateway::new().pay(request).await
    }
}

#[tokio::test]
async fn test_stalled_payment_times_out() {
    let app = setup_with(Arc::new(StalledGateway), Duration::from_millis(100)).await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/orders",
        Some(json!({ "user_uuid": Uuid::new_v4(), "part_uuids": [app.parts[0].uuid] })),
    )
    .await;
    let order_uuid = created["order_uuid"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/orders/{}/pay", order_uuid),
        Some(json!({ "payment_method": "CARD" })),
    )
    .await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body, json!({ "code": 408, "message": "request timed out" }));

    let (_, order) = send(&app, Method::GET, &format!("/orders/{}", order_uuid), None).await;
    assert_eq!(order["status"], json!("PENDING_PAYMENT"));
    assert!(order["transaction_uuid"].is_null());
}

#[tokio::test]
async fn test_part_lookup_and_search() {
    let app = setup().await;

    let part_uri = format!("/parts/{}", app.parts[1].uuid);
    let (status, body) = send(&app, Method::GET, &part_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["part"]["name"], json!("Nova wing"));
    assert_eq!(body["part"]["category"], json!("WING"));

    let (status, _) = send(&app, Method::GET, &format!("/parts/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        Method::POST,
        "/parts/search",
        Some(json!({ "filter": { "manufacturer_countries": ["Japan"] } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["parts"].as_array().unwrap().len(), 1);
    assert_eq!(body["parts"][0]["uuid"], json!(app.parts[0].uuid));

    let (status, body) = send(
        &app,
        Method::POST,
        "/parts/search",
        Some(json!({ "filter": { "tags": ["certified", "carbon"] } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["parts"].as_array().unwrap().is_empty());

    let (status, body) = send(&app, Method::POST, "/parts/search", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["parts"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_direct_payment() {
    let app = setup().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/payments",
        Some(json!({
            "order_uuid": Uuid::new_v4(),
            "user_uuid": Uuid::new_v4(),
            "payment_method": "INVESTOR_MONEY",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["transaction_uuid"].is_string());

    let (status, body) = send(
        &app,
        Method::POST,
        "/payments",
        Some(json!({
            "order_uuid": Uuid::new_v4(),
            "user_uuid": "someone",
            "payment_method": "CARD",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_error(&body, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = setup().await;
    let (status, body) = send(&app, Method::GET, "/warehouses", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, StatusCode::NOT_FOUND);
}
