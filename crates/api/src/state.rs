//! Application state shared across handlers.

use std::sync::Arc;

use crate::store::BundleStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable; the store adapter is behind an `Arc` so the same
/// instance serves every concurrent request.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn BundleStore>,
}

impl AppState {
    /// Create a new application state over a store adapter.
    #[must_use]
    pub fn new(store: Arc<dyn BundleStore>) -> Self {
        Self { store }
    }

    /// Get a reference to the bundle store.
    #[must_use]
    pub fn store(&self) -> &dyn BundleStore {
        self.store.as_ref()
    }
}
