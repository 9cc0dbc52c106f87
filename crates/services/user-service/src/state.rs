//! Application state for dependency injection.

use std::sync::Arc;

use crate::cache::UserCache;
use crate::repository::UserRepository;
use crate::service::UserService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    /// Held for health checks only
    pub store: Arc<dyn UserRepository>,
    pub cache: Arc<dyn UserCache>,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        user_service: Arc<dyn UserService>,
        store: Arc<dyn UserRepository>,
        cache: Arc<dyn UserCache>,
    ) -> Self {
        Self {
            user_service,
            store,
            cache,
        }
    }
}
