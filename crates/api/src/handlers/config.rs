//! Handlers for the `/config` resource: linting uploaded rule envelopes and
//! exporting the server's default rule sets.

use axum::extract::State;
use axum::Json;
use drillcheck_core::config_export::ConfigEnvelope;
use drillcheck_core::config_lint::{lint, ConfigIssue};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/config/lint
///
/// Report rules in the envelope that can never fire or are ambiguous. The
/// body is parsed as an exported envelope file, so malformed archives map
/// to `MALFORMED_JSON`.
pub async fn lint_config(body: String) -> AppResult<Json<DataResponse<Vec<ConfigIssue>>>> {
    let envelope = ConfigEnvelope::from_json(&body)?;
    let version = envelope.version.clone();
    let issues = lint(&envelope.into_snapshot());
    log_config_issues(&issues);
    tracing::debug!(version = %version, issues = issues.len(), "Linted configuration envelope");
    Ok(Json(DataResponse::new(issues)))
}

/// GET /api/v1/config/defaults
///
/// The rule sets used when a validation request brings none of its own.
pub async fn get_defaults(State(state): State<AppState>) -> Json<DataResponse<ConfigEnvelope>> {
    let envelope = state
        .rules
        .to_envelope(env!("CARGO_PKG_VERSION"), chrono::Utc::now());
    Json(DataResponse::new(envelope))
}

pub(crate) fn log_config_issues(issues: &[ConfigIssue]) {
    for issue in issues {
        tracing::warn!(
            code = ?issue.code,
            table = ?issue.table,
            column = ?issue.column,
            "{}",
            issue.message
        );
    }
}
