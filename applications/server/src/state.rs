/// Shared application state
use crate::services::AuthService;
use bazaar_core::MarketStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MarketStore>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(store: Arc<dyn MarketStore>, auth_service: Arc<AuthService>) -> Self {
        Self {
            store,
            auth_service,
        }
    }
}
