//! Router tests

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use upgrade_mock::app::options::{AppOptions, SimulationOptions};
use upgrade_mock::app::run::init_server_state;
use upgrade_mock::server::serve::router;
use upgrade_mock::server::state::ServerState;
use upgrade_mock::workflow::{Simulator, UpgradeStage};

use crate::common::{recorder_with, InstantDelay, MemoryStore};

fn test_router(store: Arc<MemoryStore>) -> Router {
    let recorder = Arc::new(recorder_with(store, Duration::from_secs(10)));
    let simulator = Simulator::new(
        recorder,
        Arc::new(InstantDelay::default()),
        SimulationOptions::default(),
    );
    router(Arc::new(ServerState::new(Arc::new(simulator))))
}

fn stage_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = test_router(Arc::new(MemoryStore::default()));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["service"], json!("upgrade-mock"));
}

#[tokio::test]
async fn test_version() {
    let app = test_router(Arc::new(MemoryStore::default()));

    let response = app
        .oneshot(Request::builder().uri("/version").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
}

#[tokio::test]
async fn test_stage_returns_final_event() {
    let store = Arc::new(MemoryStore::default());
    let app = test_router(store.clone());

    let response = app
        .oneshot(stage_request(
            "/check_device_compatibility",
            json!({"flowInstanceID": "flow-1", "deviceID": "dev-9", "step": "check"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["flowInstanceId"], json!("flow-1"));
    assert_eq!(body["deviceId"], json!("dev-9"));
    assert_eq!(body["stage"], json!("Upgrade"));
    assert_eq!(body["step"], json!("check"));
    assert_eq!(body["status"], json!("SUCCESS"));
    assert_eq!(body["message"], json!("Compatibility check passed"));
    assert_eq!(body["details"]["nic_fw"], json!("1.0.0"));
    assert!(body["timestamp"].is_i64());

    let events = store.events();
    assert_eq!(events.len(), 5);
    assert_eq!(body["id"], json!(events[4].id()));
}

#[tokio::test]
async fn test_every_stage_route_is_served() {
    for stage in UpgradeStage::ALL {
        let app = test_router(Arc::new(MemoryStore::default()));

        let response = app
            .oneshot(stage_request(
                &stage.route(),
                json!({"flowInstanceID": "flow-1", "deviceID": "dev-9", "step": stage.name()}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "route {}", stage.route());
        let body = body_json(response).await;
        assert_eq!(body["step"], json!(stage.name()));
    }
}

#[tokio::test]
async fn test_malformed_request_rejected_before_recording() {
    let store = Arc::new(MemoryStore::default());
    let app = test_router(store.clone());

    let response = app
        .oneshot(stage_request("/mgmt_port", json!({"deviceID": "dev-9"})))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert!(store.events().is_empty());
}

#[tokio::test]
async fn test_get_on_stage_not_allowed() {
    let app = test_router(Arc::new(MemoryStore::default()));

    let response = app
        .oneshot(Request::builder().uri("/mgmt_port").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_stage_served_while_log_store_unreachable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut options = AppOptions::default();
    options.sink.base_url = format!("http://{}", addr);
    options.sink.timeout = Duration::from_secs(2);
    let app = router(init_server_state(&options).unwrap());

    let response = app
        .oneshot(stage_request(
            "/device_activation",
            json!({"flowInstanceID": "flow-7", "deviceID": "dev-7", "step": "activate"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Device activation completed"));
    assert_eq!(body["details"], json!({"activation_status": "Completed"}));
}
