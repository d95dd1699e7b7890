//! HTTP-level integration tests for the `/api/v1/config` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, build_test_app_with, get, post_json};
use drillcheck_core::config_export::ConfigSnapshot;
use drillcheck_core::library::CodeLibrary;
use serde_json::json;

#[tokio::test]
async fn defaults_are_exported_as_envelope() {
    let response = get(build_test_app(), "/api/v1/config/defaults").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["version"], env!("CARGO_PKG_VERSION"));
    assert!(data["timestamp"].is_string());

    let tables: Vec<&str> = data["configs"]
        .as_array()
        .expect("configs should be an array")
        .iter()
        .map(|c| c["tableType"].as_str().unwrap())
        .collect();
    assert_eq!(tables.len(), 11);
    assert_eq!(&tables[..2], &["COLLAR", "SURVEY"]);

    let libraries: Vec<&str> = data["libraries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["id"].as_str().unwrap())
        .collect();
    assert_eq!(libraries, vec!["lith", "oxidation"]);
}

#[tokio::test]
async fn defaults_reflect_injected_rules() {
    let rules = ConfigSnapshot::new(vec![], vec![CodeLibrary::new("x", "X", &[("A", "")])]);
    let json = body_json(get(build_test_app_with(rules), "/api/v1/config/defaults").await).await;
    assert_eq!(json["data"]["configs"], json!([]));
    assert_eq!(json["data"]["libraries"][0]["id"], "x");
}

#[tokio::test]
async fn exported_defaults_lint_clean() {
    let exported = body_json(get(build_test_app(), "/api/v1/config/defaults").await).await;
    let response = post_json(build_test_app(), "/api/v1/config/lint", exported["data"].clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!([]));
}

#[tokio::test]
async fn lint_reports_issues() {
    let envelope = json!({
        "timestamp": 1_700_000_000_000_i64,
        "version": "3",
        "libraries": [],
        "configs": [{
            "tableType": "RQD",
            "columns": [
                { "name": "RQD_PCT", "label": "RQD", "type": "number",
                  "validation": { "range": { "min": 100, "max": 0, "strict": true } } },
                { "name": "RQD_CODE", "label": "Code", "type": "string",
                  "validation": { "lookup": { "libraryId": "rqd", "caseSensitive": false } } }
            ]
        }]
    });
    let response = post_json(build_test_app(), "/api/v1/config/lint", envelope).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let issues = json["data"].as_array().unwrap();
    let codes: Vec<&str> = issues.iter().map(|i| i["code"].as_str().unwrap()).collect();
    assert_eq!(codes, vec!["RANGE_BOUNDS_INVERTED", "UNKNOWN_LIBRARY"]);
    assert_eq!(issues[0]["table"], "RQD");
    assert_eq!(issues[0]["column"], "RQD_PCT");
}

#[tokio::test]
async fn ambiguous_rule_is_rejected() {
    let envelope = json!({
        "timestamp": "2024-01-01T00:00:00Z",
        "version": "1",
        "configs": [{
            "tableType": "ASSAY",
            "columns": [{
                "name": "AU_PPM", "label": "Au", "type": "number",
                "validation": {
                    "range": { "min": 0 },
                    "lookup": { "libraryId": "lith" }
                }
            }]
        }]
    });
    let response = post_json(build_test_app(), "/api/v1/config/lint", envelope).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn empty_validation_blocks_lint_clean() {
    let envelope = json!({
        "timestamp": "2024-01-01T00:00:00Z",
        "version": "1",
        "configs": [{
            "tableType": "VEIN",
            "columns": [
                { "name": "VEIN_TYPE", "validation": {} },
                { "name": "NOTE", "type": "string", "validation": { "isKeyReference": false } }
            ]
        }]
    });
    let response = post_json(build_test_app(), "/api/v1/config/lint", envelope).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!([]));
}
