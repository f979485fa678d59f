//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! carries the session configuration and the backend API client; neither is
//! mutated after startup, so there is no lock here.

use std::sync::Arc;

use crate::config::SessionConfig;
use crate::services::upstream::ApiClient;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the config is Arc-wrapped and the client is a
/// cheap handle.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SessionConfig>,
    pub api: ApiClient,
}

impl AppState {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let api = ApiClient::from_config(&config);
        Self { config: Arc::new(config), api }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
