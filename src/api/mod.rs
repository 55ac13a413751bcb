pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::AuthUser;
pub use routes::build_router;

use crate::config::SearchLimitsConfig;
use crate::search::{SearchHistoryStore, SearchService};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchService>,
    pub history: Arc<SearchHistoryStore>,
    pub limits: SearchLimitsConfig,
}

impl AppState {
    pub fn new(search: Arc<SearchService>, limits: SearchLimitsConfig) -> Self {
        let history = Arc::clone(search.history());
        Self {
            search,
            history,
            limits,
        }
    }
}
