//! Route definitions for dataset validation.

use axum::routing::post;
use axum::Router;

use crate::handlers::validation;
use crate::state::AppState;

/// ```text
/// POST   /validate     -> validate
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/validate", post(validation::validate))
}
