//! Depth consistency against each hole's declared end-of-hole (EOH) depth.
//!
//! Interval rows are checked one by one (no `DEPTH_TO` past EOH) and per
//! site (the deepest in-bounds interval must reach EOH). Survey points get
//! the simpler point check.

use std::collections::HashMap;

use indexmap::IndexMap;

use super::report::{CheckCategory, Severity, ValidationError};
use crate::row::{Row, DEPTH, DEPTH_TO};
use crate::rules::TableType;

/// Slack allowed on EOH comparisons to absorb floating-point noise.
pub const EOH_TOLERANCE: f64 = 0.01;

/// `SITE_ID -> END_DEPTH` for every Collar row with a non-blank `SITE_ID`.
/// Later duplicates shadow earlier ones.
pub fn collar_end_depths(collars: &[Row]) -> HashMap<String, f64> {
    collars
        .iter()
        .map(|row| (row.site_key(), row.end_depth()))
        .filter(|(key, _)| !key.trim().is_empty())
        .collect()
}

/// Positive declared EOH for the row's hole, if the hole is known.
fn declared_eoh(end_depths: &HashMap<String, f64>, row: &Row) -> Option<f64> {
    end_depths
        .get(&row.site_key())
        .copied()
        .filter(|end| *end > 0.0)
}

struct SiteCoverage {
    site_id: String,
    end_depth: f64,
    deepest: f64,
    deepest_row: Option<String>,
    first_row: String,
    exceeded: bool,
}

/// Check an interval table's `DEPTH_TO` values against EOH.
///
/// Holes absent from the Collar map, or with a non-positive EOH, are skipped.
pub fn validate_interval_depths(
    end_depths: &HashMap<String, f64>,
    rows: &[Row],
    table: TableType,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut coverage: IndexMap<String, SiteCoverage> = IndexMap::new();

    for row in rows {
        let Some(end_depth) = declared_eoh(end_depths, row) else {
            continue;
        };
        let depth_to = row.depth_to();
        let site = coverage
            .entry(row.site_key())
            .or_insert_with(|| SiteCoverage {
                site_id: row.site_id(),
                end_depth,
                deepest: 0.0,
                deepest_row: None,
                first_row: row.id.clone(),
                exceeded: false,
            });

        if depth_to > end_depth + EOH_TOLERANCE {
            site.exceeded = true;
            errors.push(ValidationError::new(
                CheckCategory::ExceededEoh,
                Severity::Critical,
                table,
                &row.id,
                &site.site_id,
                Some(DEPTH_TO),
                format!(
                    "DEPTH_TO {depth_to} exceeds EOH {end_depth} on site {}",
                    site.site_id
                ),
            ));
        } else if site.deepest_row.is_none() || depth_to > site.deepest {
            site.deepest = depth_to;
            site.deepest_row = Some(row.id.clone());
        }
    }

    for site in coverage.values() {
        if site.end_depth - site.deepest <= EOH_TOLERANCE {
            continue;
        }
        // A hole already flagged for exceeding EOH is not penalised twice.
        let severity = if site.exceeded {
            Severity::Warning
        } else {
            Severity::Critical
        };
        let row_id = site.deepest_row.as_deref().unwrap_or(&site.first_row);
        let mut error = ValidationError::new(
            CheckCategory::BottomCoverage,
            severity,
            table,
            row_id,
            &site.site_id,
            Some(DEPTH_TO),
            format!(
                "Deepest interval ({}) does not reach EOH ({}) on site {}",
                site.deepest, site.end_depth, site.site_id
            ),
        );
        error.id = CheckCategory::BottomCoverage.error_id(table, &site.site_id, Some(DEPTH_TO));
        errors.push(error);
    }

    errors
}

/// Check survey point depths against EOH. No tolerance is applied.
pub fn validate_survey_depths(
    end_depths: &HashMap<String, f64>,
    rows: &[Row],
) -> Vec<ValidationError> {
    rows.iter()
        .filter_map(|row| {
            let end_depth = declared_eoh(end_depths, row)?;
            let depth = row.depth();
            (depth > end_depth).then(|| {
                let site = row.site_id();
                ValidationError::new(
                    CheckCategory::SurveyExceededEoh,
                    Severity::Critical,
                    TableType::Survey,
                    &row.id,
                    &site,
                    Some(DEPTH),
                    format!("Survey depth {depth} exceeds EOH {end_depth} on site {site}"),
                )
            })
        })
        .collect()
}
