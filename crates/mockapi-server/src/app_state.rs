// ABOUTME: Shared application state for the mockapi HTTP server.
// ABOUTME: Wraps the in-memory MockStore in a lock so every handler gets the same tables.

use std::sync::Arc;

use mockapi_core::MockStore;
use tokio::sync::RwLock;

/// Shared application state accessible by all Axum handlers.
/// One store per server instance; tests build their own.
pub struct AppState {
    pub store: RwLock<MockStore>,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(store: MockStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    /// State backed by a freshly seeded store.
    pub fn seeded() -> Self {
        Self::new(MockStore::new())
    }
}
