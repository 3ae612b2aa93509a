//! Application state shared across handlers

use std::sync::Arc;

use application::ports::UserStore;
use application::{AccountService, CampgroundService, ReviewService};
use infrastructure::{AppConfig, ViewEngine};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Campground listings service
    pub campgrounds: Arc<CampgroundService>,
    /// Review service
    pub reviews: Arc<ReviewService>,
    /// Account service
    pub accounts: Arc<AccountService>,
    /// User store, consumed by the authentication-context layer
    pub users: Arc<dyn UserStore>,
    /// View engine for page rendering
    pub views: ViewEngine,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
