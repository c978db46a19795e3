use std::sync::Arc;

use service::{ContactStore, InMemoryContactStore};

/// Shared handler state. The store is chosen by whoever builds the router.
#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<dyn ContactStore>,
}

impl AppState {
    pub fn new(contacts: Arc<dyn ContactStore>) -> Self {
        Self { contacts }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryContactStore::new()))
    }
}
