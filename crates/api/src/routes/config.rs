//! Route definitions for the `/config` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::config;
use crate::state::AppState;

/// Routes mounted at `/config`.
///
/// ```text
/// POST   /lint         -> lint_config
/// GET    /defaults     -> get_defaults
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lint", post(config::lint_config))
        .route("/defaults", get(config::get_defaults))
}
