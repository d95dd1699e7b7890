//! Validation orchestrator: sequences every check across all table types
//! and aggregates the result into one summary.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;

use super::aggregator::aggregate;
use super::depth::{collar_end_depths, validate_interval_depths, validate_survey_depths};
use super::geometry::validate_geometry;
use super::integrity::{collar_site_keys, validate_integrity};
use super::report::{ValidationError, ValidationSummary};
use super::structure::validate_structure;
use super::values::validate_values;
use crate::config_export::ConfigSnapshot;
use crate::row::{Dataset, Row};
use crate::rules::{TableConfig, TableType, INTERVAL_TABLES};

/// Lookups derived once from the Collar table and shared by every child pass.
struct CollarIndex {
    sites: HashSet<String>,
    end_depths: HashMap<String, f64>,
}

/// Run every check over `dataset` using the rule sets in `snapshot`.
///
/// Tables without an active rule set are skipped. Interval tables are
/// validated in parallel; results are concatenated in table order before
/// the single aggregation step, so the output is deterministic.
pub fn validate_dataset(dataset: &Dataset, snapshot: &ConfigSnapshot) -> ValidationSummary {
    let collars = dataset.rows(TableType::Collar);
    let index = CollarIndex {
        sites: collar_site_keys(collars),
        end_depths: collar_end_depths(collars),
    };

    let mut errors = Vec::new();

    if let Some(config) = snapshot.table(TableType::Collar) {
        errors.extend(validate_collar(collars, config, snapshot));
    }

    if let Some(config) = snapshot.table(TableType::Survey) {
        let rows = dataset.rows(TableType::Survey);
        errors.extend(validate_survey(rows, config, &index, snapshot));
    }

    let interval_errors: Vec<Vec<ValidationError>> = INTERVAL_TABLES
        .par_iter()
        .map(|&table| match snapshot.table(table) {
            Some(config) => {
                validate_interval_table(table, dataset.rows(table), config, &index, snapshot)
            }
            None => Vec::new(),
        })
        .collect();
    errors.extend(interval_errors.into_iter().flatten());

    let raw_count = errors.len();
    let summary = ValidationSummary::from_errors(aggregate(errors));
    tracing::info!(
        rows = dataset.total_rows(),
        raw_findings = raw_count,
        findings = summary.errors.len(),
        total_errors = summary.total_errors,
        total_warnings = summary.total_warnings,
        "Validation run complete"
    );
    summary
}

fn validate_collar(
    rows: &[Row],
    config: &TableConfig,
    snapshot: &ConfigSnapshot,
) -> Vec<ValidationError> {
    let mut errors = validate_values(rows, config, snapshot);
    errors.extend(validate_structure(rows, config));
    log_table_pass(TableType::Collar, rows.len(), errors.len());
    errors
}

fn validate_survey(
    rows: &[Row],
    config: &TableConfig,
    index: &CollarIndex,
    snapshot: &ConfigSnapshot,
) -> Vec<ValidationError> {
    let mut errors = validate_structure(rows, config);
    errors.extend(validate_values(rows, config, snapshot));
    errors.extend(validate_integrity(&index.sites, rows, TableType::Survey));
    errors.extend(validate_survey_depths(&index.end_depths, rows));
    log_table_pass(TableType::Survey, rows.len(), errors.len());
    errors
}

fn validate_interval_table(
    table: TableType,
    rows: &[Row],
    config: &TableConfig,
    index: &CollarIndex,
    snapshot: &ConfigSnapshot,
) -> Vec<ValidationError> {
    let mut errors = validate_structure(rows, config);
    errors.extend(validate_integrity(&index.sites, rows, table));
    errors.extend(validate_interval_depths(&index.end_depths, rows, table));
    errors.extend(validate_geometry(rows, table));
    errors.extend(validate_values(rows, config, snapshot));
    log_table_pass(table, rows.len(), errors.len());
    errors
}

fn log_table_pass(table: TableType, rows: usize, findings: usize) {
    tracing::debug!(table = %table, rows, findings, "Table validated");
}
