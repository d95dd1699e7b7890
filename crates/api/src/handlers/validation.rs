//! Handler for dataset validation.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use drillcheck_core::config_export::ConfigSnapshot;
use drillcheck_core::config_lint::{lint, ConfigIssue};
use drillcheck_core::library::CodeLibrary;
use drillcheck_core::row::Dataset;
use drillcheck_core::rules::TableConfig;
use drillcheck_core::validation::{validate_dataset, ValidationSummary};
use serde::{Deserialize, Serialize};

use super::config::log_config_issues;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /validate`.
///
/// `configs` and `libraries` fall back to the server's defaults
/// independently when omitted.
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub tables: Dataset,
    pub configs: Option<Vec<TableConfig>>,
    pub libraries: Option<Vec<CodeLibrary>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub summary: ValidationSummary,
    pub config_issues: Vec<ConfigIssue>,
}

/// POST /api/v1/validate
///
/// Run every check over the submitted tables. The run is CPU-bound, so it
/// executes on the blocking pool.
pub async fn validate(
    State(state): State<AppState>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<ValidateResponse>>> {
    let Json(request) = payload?;

    let snapshot = ConfigSnapshot::new(
        request
            .configs
            .unwrap_or_else(|| state.rules.configs.clone()),
        request
            .libraries
            .unwrap_or_else(|| state.rules.libraries.clone()),
    );
    let config_issues = lint(&snapshot);
    log_config_issues(&config_issues);

    let dataset = request.tables;
    tracing::debug!(rows = dataset.total_rows(), "Validating dataset");

    let summary = tokio::task::spawn_blocking(move || validate_dataset(&dataset, &snapshot))
        .await
        .map_err(|e| AppError::InternalError(format!("validation task failed: {e}")))?;

    Ok(Json(DataResponse::new(ValidateResponse {
        summary,
        config_issues,
    })))
}
