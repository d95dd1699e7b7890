use std::sync::Arc;

use drillcheck_core::config_export::ConfigSnapshot;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Rule sets and libraries used when a request does not bring its own.
    pub rules: Arc<ConfigSnapshot>,
}

impl AppState {
    pub fn new(config: ServerConfig, rules: ConfigSnapshot) -> Self {
        Self {
            config: Arc::new(config),
            rules: Arc::new(rules),
        }
    }
}
