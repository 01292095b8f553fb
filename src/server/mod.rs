//! HTTP surface for the bridge binary.
//!
//! The event-ingestion and authentication layer in front of the reporter is
//! an external collaborator; this module only carries the liveness endpoint
//! the deployment needs.
//!
//! # Endpoints
//!
//! - `GET /health` - Returns 200 if the server is running

use std::sync::Arc;

use axum::routing::get;

use crate::trigger::TriggerSettings;

/// Shared application state, passed to handlers via axum's `State`
/// extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Live configuration snapshot for the bridge.
    settings: TriggerSettings,
}

impl AppState {
    /// Creates a new `AppState` with the given configuration.
    pub fn new(settings: TriggerSettings) -> Self {
        AppState {
            inner: Arc::new(AppStateInner { settings }),
        }
    }

    /// Returns the live configuration.
    pub fn settings(&self) -> &TriggerSettings {
        &self.inner.settings
    }
}

/// Liveness probe handler.
pub async fn health_handler() -> &'static str {
    "OK"
}

/// Builds the axum Router with all endpoints.
pub fn build_router(app_state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/health", get(health_handler))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_state_exposes_settings() {
        let settings = TriggerSettings {
            log_excerpt_lines: 12,
            ..TriggerSettings::default()
        };
        let state = AppState::new(settings);
        assert_eq!(state.settings().log_excerpt_lines, 12);
    }

    #[test]
    fn app_state_is_cheaply_cloneable() {
        let state = AppState::new(TriggerSettings::default());
        let cloned = state.clone();
        assert_eq!(state.settings(), cloned.settings());
    }
}
