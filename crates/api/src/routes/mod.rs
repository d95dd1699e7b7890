pub mod config;
pub mod health;
pub mod validation;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /validate                 run the engine over a dataset (POST)
/// /config/lint              lint a configuration envelope (POST)
/// /config/defaults          active default rule sets (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(validation::router())
        .nest("/config", config::router())
}
