//! Web Application State
//!
//! Shared, read-only state handed to every handler.

use std::sync::Arc;
use tracing::info;

use crate::config::WebConfig;
use crate::services::StatusService;
use crate::store::StatusStore;

/// Shared state for the telemetry web application
#[derive(Clone, Debug)]
pub struct TelemetryWebState {
    pub status_service: StatusService,

    /// Web API configuration
    pub config: WebConfig,
}

impl TelemetryWebState {
    pub fn new(store: Arc<dyn StatusStore>, config: WebConfig) -> Self {
        info!(
            bind_address = %config.bind_address,
            cors_open = config.cors.is_open(),
            "Initializing telemetry web state"
        );

        Self {
            status_service: StatusService::new(store),
            config,
        }
    }

    pub fn status_service(&self) -> &StatusService {
        &self.status_service
    }
}
