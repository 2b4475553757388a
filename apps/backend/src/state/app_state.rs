use std::sync::Arc;

use crate::infra::store::ConnectionManager;

/// Application state shared with every handler through `web::Data`.
///
/// The startup routine owns the single [`ConnectionManager`] of the process
/// and hands clones of this state to the HTTP workers.
#[derive(Debug, Clone)]
pub struct AppState {
    store: Arc<ConnectionManager>,
}

impl AppState {
    pub fn new(store: Arc<ConnectionManager>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ConnectionManager {
        &self.store
    }
}
