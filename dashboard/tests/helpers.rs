//! Test helper utilities for dashboard integration tests

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use shared::{DeviceRecord, DeviceSnapshot};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

use dashboard::core::NoopObserver;
use dashboard::traits::{MockDeviceStore, MockStaticFileServer};
use dashboard::DashboardServer;

pub type TestServer = DashboardServer<MockDeviceStore, MockStaticFileServer>;

/// Four devices: two in CA, one in NY, one with a ZIP outside every range
pub fn sample_snapshot() -> DeviceSnapshot {
    DeviceSnapshot::from_records(vec![
        DeviceRecord::new("heater-001", Some(90001u32.into()), Some(5)),
        DeviceRecord::new("heater-002", Some(90210u32.into()), Some(2)),
        DeviceRecord::new("heater-003", Some("10001".into()), Some(3)),
        DeviceRecord::new("heater-004", Some(99999u32.into()), Some(7)),
    ])
}

/// Store mock that accepts any number of `describe` calls
pub fn mock_store() -> MockDeviceStore {
    let mut store = MockDeviceStore::new();
    store.expect_describe().returning(|| "mock://devices".to_string());
    store
}

pub fn test_server(store: MockDeviceStore, static_server: MockStaticFileServer) -> TestServer {
    let bind_addr: SocketAddr = "127.0.0.1:3000".parse().unwrap();
    DashboardServer::new(bind_addr, store, static_server).with_observer(Arc::new(NoopObserver))
}

/// Send a GET through the router and return status plus raw body
pub async fn get(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

/// Send a GET and decode the body as JSON
pub async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(router, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}
