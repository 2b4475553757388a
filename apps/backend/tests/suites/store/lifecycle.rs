use std::sync::Arc;

use scaffold_backend::config::StoreConfig;
use scaffold_backend::test_support::MemoryConnector;
use scaffold_backend::{ConnectionManager, ConnectionStatus, StoreError};

fn manager(connector: &MemoryConnector, database: &str) -> ConnectionManager {
    ConnectionManager::new(
        Box::new(connector.clone()),
        StoreConfig::new("mongodb://localhost:27017", database),
    )
}

#[tokio::test]
async fn connect_twice_returns_same_handle_and_opens_once() {
    let connector = MemoryConnector::new();
    let store = manager(&connector, "app_database");

    let first = store.connect().await.expect("first connect");
    let second = store.connect().await.expect("second connect");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(connector.opens(), 1);
}

#[tokio::test]
async fn get_handle_on_fresh_manager_is_not_connected() {
    let connector = MemoryConnector::new();
    let store = manager(&connector, "app_database");

    assert_eq!(store.status(), ConnectionStatus::Disconnected);
    assert!(matches!(store.get_handle(), Err(StoreError::NotConnected)));
}

#[tokio::test]
async fn close_twice_is_safe() {
    let connector = MemoryConnector::new();
    let store = manager(&connector, "app_database");

    store.connect().await.expect("connect");
    store.close().await.expect("first close");
    store.close().await.expect("second close is a no-op");

    assert_eq!(connector.closes(), 1);
}

#[tokio::test]
async fn close_on_fresh_manager_is_noop() {
    let connector = MemoryConnector::new();
    let store = manager(&connector, "app_database");

    store.close().await.expect("close without connect");
    assert_eq!(connector.closes(), 0);
}

#[tokio::test]
async fn close_resets_state() {
    let connector = MemoryConnector::new();
    let store = manager(&connector, "app_database");

    store.connect().await.expect("connect");
    store.close().await.expect("close");

    assert!(matches!(store.get_handle(), Err(StoreError::NotConnected)));
    assert_eq!(connector.live_connections(), 0);
}

#[tokio::test]
async fn handle_is_scoped_and_reconnect_is_usable() {
    let connector = MemoryConnector::new();
    let store = manager(&connector, "inventory");

    let connected = store.connect().await.expect("connect");
    let read = store.get_handle().expect("handle after connect");
    assert!(Arc::ptr_eq(&connected, &read));
    assert_eq!(read.name(), "inventory");

    store.close().await.expect("close");
    let again = store.connect().await.expect("reconnect");

    assert!(!Arc::ptr_eq(&connected, &again));
    assert_eq!(again.name(), "inventory");
    again.ping().await.expect("fresh handle answers ping");
    assert_eq!(connector.opens(), 2);
}

#[tokio::test]
async fn default_config_targets_local_store() {
    let connector = MemoryConnector::new();
    let store = ConnectionManager::new(Box::new(connector.clone()), StoreConfig::default());

    let handle = store.connect().await.expect("connect");

    assert_eq!(
        connector.last_uri().as_deref(),
        Some("mongodb://localhost:27017")
    );
    assert_eq!(handle.name(), "app_database");
}

#[tokio::test]
async fn failed_connect_surfaces_cause_and_allows_retry_by_caller() {
    let connector = MemoryConnector::new();
    connector.fail_open(true);
    let store = manager(&connector, "app_database");

    let err = store.connect().await.expect_err("open should fail");
    match &err {
        StoreError::Connection { uri, source } => {
            assert_eq!(uri, "mongodb://localhost:27017");
            assert!(source.to_string().contains("connection refused"));
        }
        other => panic!("expected Connection error, got {other:?}"),
    }
    assert_eq!(store.status(), ConnectionStatus::Disconnected);
    assert_eq!(connector.opens(), 0);

    // The manager does not retry; a later call by the caller may succeed.
    connector.fail_open(false);
    store.connect().await.expect("caller-driven retry");
    assert_eq!(connector.opens(), 1);
}

#[tokio::test]
async fn close_error_is_returned_after_state_is_cleared() {
    let connector = MemoryConnector::new();
    connector.fail_close(true);
    let store = manager(&connector, "app_database");

    store.connect().await.expect("connect");
    let err = store.close().await.expect_err("close should report failure");

    assert!(matches!(err, StoreError::Close(_)));
    assert_eq!(store.status(), ConnectionStatus::Disconnected);
    store.close().await.expect("second close is a no-op");
}
