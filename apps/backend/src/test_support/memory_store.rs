//! In-process store driver with counters and switchable failures.
//!
//! Clones share state, so a test can keep one clone for inspection and hand
//! another to a `ConnectionManager`.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::infra::store::{BoxError, Connector, Database, DatabaseHandle, StoreClient};

#[derive(Debug, Default)]
struct Shared {
    opens: AtomicUsize,
    closes: AtomicUsize,
    fail_open: AtomicBool,
    fail_close: AtomicBool,
    fail_ping: AtomicBool,
    open_delay: Mutex<Option<Duration>>,
    last_uri: Mutex<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    shared: Arc<Shared>,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of connections opened successfully.
    pub fn opens(&self) -> usize {
        self.shared.opens.load(Ordering::SeqCst)
    }

    /// Number of close calls that reached a client.
    pub fn closes(&self) -> usize {
        self.shared.closes.load(Ordering::SeqCst)
    }

    /// Opened minus closed.
    pub fn live_connections(&self) -> usize {
        self.opens() - self.closes()
    }

    pub fn last_uri(&self) -> Option<String> {
        self.shared.last_uri.lock().clone()
    }

    pub fn fail_open(&self, fail: bool) {
        self.shared.fail_open.store(fail, Ordering::SeqCst);
    }

    pub fn fail_close(&self, fail: bool) {
        self.shared.fail_close.store(fail, Ordering::SeqCst);
    }

    /// Make pings from every handle, existing or future, fail.
    pub fn fail_ping(&self, fail: bool) {
        self.shared.fail_ping.store(fail, Ordering::SeqCst);
    }

    /// Suspend each open for `delay` before completing.
    pub fn with_open_delay(self, delay: Duration) -> Self {
        *self.shared.open_delay.lock() = Some(delay);
        self
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn open(&self, uri: &str) -> Result<Box<dyn StoreClient>, BoxError> {
        *self.shared.last_uri.lock() = Some(uri.to_string());

        let delay = *self.shared.open_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.shared.fail_open.load(Ordering::SeqCst) {
            return Err(format!("connection refused: {uri}").into());
        }

        self.shared.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemoryClient {
            shared: self.shared.clone(),
        }))
    }
}

struct MemoryClient {
    shared: Arc<Shared>,
}

#[async_trait]
impl StoreClient for MemoryClient {
    fn database(&self, name: &str) -> DatabaseHandle {
        Arc::new(MemoryDatabase {
            name: name.to_string(),
            shared: self.shared.clone(),
        })
    }

    async fn close(&self) -> Result<(), BoxError> {
        self.shared.closes.fetch_add(1, Ordering::SeqCst);
        if self.shared.fail_close.load(Ordering::SeqCst) {
            return Err("socket already closed".into());
        }
        Ok(())
    }
}

#[derive(Debug)]
struct MemoryDatabase {
    name: String,
    shared: Arc<Shared>,
}

#[async_trait]
impl Database for MemoryDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    async fn ping(&self) -> Result<(), BoxError> {
        if self.shared.fail_ping.load(Ordering::SeqCst) {
            return Err("server selection timeout".into());
        }
        Ok(())
    }
}
