use std::sync::Arc;

use claimlens_session::dispatcher::Dispatcher;
use claimlens_session::store::SessionStore;
use claimlens_warehouse::access::ClaimData;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            sessions: SessionStore::new(),
            dispatcher: Arc::new(dispatcher),
        }
    }

    pub fn data(&self) -> &ClaimData {
        self.dispatcher.data()
    }
}
