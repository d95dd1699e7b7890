//! Tests for `AppError` -> HTTP response mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use drillcheck_api::error::AppError;
use drillcheck_core::error::CoreError;
use http_body_util::BodyExt;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn config_error_returns_422() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Config("two rules".into()))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "INVALID_CONFIG");
}

#[tokio::test]
async fn parse_error_returns_422() {
    let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let (status, json) = error_to_response(AppError::Core(CoreError::from(err))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn internal_errors_are_masked() {
    let (status, json) = error_to_response(AppError::InternalError("secret detail".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}
