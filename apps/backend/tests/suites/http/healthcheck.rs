use actix_web::test;
use scaffold_backend::StoreError;

use crate::common::{read_json, trace_id_header};
use crate::support::{connected_memory_state, create_test_app, disconnected_memory_state};

fn assert_iso_timestamp(value: &serde_json::Value) {
    let ts = value.as_str().expect("timestamp should be a string");
    // 2024-05-01T12:00:00.000Z
    assert_eq!(ts.len(), 24, "unexpected timestamp {ts}");
    assert!(ts.ends_with('Z'), "timestamp should be UTC: {ts}");
}

#[actix_web::test]
async fn test_health_connected_reports_healthy() {
    let (state, _connector) = connected_memory_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body = read_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["mongodb"], "connected");
    assert_eq!(
        body["message"],
        "Backend is running and connected to MongoDB"
    );
    assert!(body.get("error").is_none());
    assert_iso_timestamp(&body["timestamp"]);
}

#[actix_web::test]
async fn test_health_before_connect_reports_unhealthy() {
    let (state, connector) = disconnected_memory_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 503);
    let body = read_json(resp).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["mongodb"], "disconnected");
    assert_eq!(
        body["message"],
        "Backend is running but MongoDB connection failed"
    );
    assert_eq!(body["error"], StoreError::NotConnected.to_string());
    assert_iso_timestamp(&body["timestamp"]);

    // The probe reads the handle; it never connects on its own.
    assert_eq!(connector.opens(), 0);
}

#[actix_web::test]
async fn test_health_ping_failure_reports_unhealthy() {
    let (state, connector) = connected_memory_state().await;
    connector.fail_ping(true);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 503);
    let body = read_json(resp).await;
    assert_eq!(body["mongodb"], "disconnected");
    assert_eq!(body["error"], "server selection timeout");
}

#[actix_web::test]
async fn test_health_follows_close_and_reconnect() {
    let (state, connector) = connected_memory_state().await;
    let store_state = state.clone();
    let app = create_test_app(state).with_prod_routes().build().await;

    store_state.store().close().await.expect("close");
    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 503);

    store_state.store().connect().await.expect("reconnect");
    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    assert_eq!(connector.opens(), 2);
    assert_eq!(connector.closes(), 1);
}

#[actix_web::test]
async fn test_health_responses_carry_trace_id() {
    let (state, _connector) = disconnected_memory_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let first = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/health").to_request(),
    )
    .await;
    let second = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/health").to_request(),
    )
    .await;

    let a = trace_id_header(&first);
    let b = trace_id_header(&second);
    assert_eq!(a.len(), 36, "trace id should be a UUID: {a}");
    assert_ne!(a, b);
}
