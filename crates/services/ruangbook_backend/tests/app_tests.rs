use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Asia::Jakarta;
use ruangbook_backend::api_router;
use ruangbook_backend::app_state::AppState;
use ruangbook_backend::service_factory::StoreFactory;
use ruangbook_booking::ChangeKind;
use ruangbook_common::FixedClock;
use ruangbook_config::AppConfig;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn jakarta(hour: u32, minute: u32) -> DateTime<Utc> {
    Jakarta
        .with_ymd_and_hms(2025, 3, 10, hour, minute, 0)
        .unwrap()
        .with_timezone(&Utc)
}

fn state() -> AppState {
    let mut config = AppConfig::default();
    config.admin.jwt_secret = "backend-test-secret".to_string();
    config.admin.bootstrap_admins = vec!["admin@kantor.co.id".to_string()];
    AppState::new(
        Arc::new(config),
        StoreFactory::in_memory(),
        Arc::new(FixedClock::new(jakarta(15, 45))),
    )
    .unwrap()
}

async fn call(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn api_is_nested_under_api_prefix() {
    let router = api_router(&state());
    let (status, body) = call(&router, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store_healthy"], true);

    let (status, _) = call(&router, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_cancellation_frees_the_public_slot() {
    let state = state();
    let router = api_router(&state);
    let mut changes = state.notifier.subscribe();

    let form = json!({
        "booker_name": "Agus Santoso",
        "department": "Operations",
        "participant_count": 10,
        "usage_date": "2025-03-11",
        "start_time": "10:00",
        "end_time": "12:00",
        "room": "ruang_diskusi_3"
    });
    let (status, created) = call(&router, "POST", "/api/bookings", None, Some(form.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(changes.recv().await.unwrap().kind, ChangeKind::Created);

    let (status, _) = call(&router, "POST", "/api/bookings", None, Some(form.clone())).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let credentials = json!({"email": "admin@kantor.co.id", "password": "rahasia123"});
    let (status, _) = call(&router, "POST", "/api/admin/auth/register", None, Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, login) = call(&router, "POST", "/api/admin/auth/login", None, Some(credentials)).await;
    let token = login["token"].as_str().unwrap().to_string();

    let uri = format!("/api/admin/bookings/{}/cancel", created["id"].as_str().unwrap());
    let (status, _) = call(&router, "PATCH", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(changes.recv().await.unwrap().kind, ChangeKind::Cancelled);

    let (_, tomorrow) = call(&router, "GET", "/api/bookings/tomorrow", None, None).await;
    assert_eq!(tomorrow["bookings"], json!([]));

    let (status, _) = call(&router, "POST", "/api/bookings", None, Some(form)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, list) = call(&router, "GET", "/api/admin/bookings", Some(&token), None).await;
    assert_eq!(list["total"], 2);
}
