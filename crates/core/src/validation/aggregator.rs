//! Collapses near-duplicate findings so one systemic problem (a wrong total
//! depth, a misspelled code) yields one report line instead of one per row.

use indexmap::IndexMap;

use super::report::{CheckCategory, ErrorType, Severity, ValidationError};
use crate::rules::TableType;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GroupKey {
    table: TableType,
    site_id: String,
    column: Option<String>,
    error_type: ErrorType,
    severity: Severity,
    category: CheckCategory,
}

impl GroupKey {
    fn of(error: &ValidationError) -> Self {
        Self {
            table: error.table,
            site_id: error.site_id.clone(),
            column: error.column.clone(),
            error_type: error.error_type,
            severity: error.severity,
            category: error.category,
        }
    }
}

/// Group findings by `(table, site, column, type, severity, category)`.
///
/// Singleton groups pass through unchanged. Larger groups collapse into one
/// finding listing every member row id. Groups keep first-appearance order.
pub fn aggregate(errors: Vec<ValidationError>) -> Vec<ValidationError> {
    let mut groups: IndexMap<GroupKey, Vec<ValidationError>> = IndexMap::new();
    for error in errors {
        groups.entry(GroupKey::of(&error)).or_default().push(error);
    }

    groups
        .into_iter()
        .filter_map(|(key, mut members)| {
            if members.len() == 1 {
                return members.pop();
            }
            Some(collapse(&key, &members))
        })
        .collect()
}

fn collapse(key: &GroupKey, members: &[ValidationError]) -> ValidationError {
    let row_ids: Vec<&str> = members.iter().map(|e| e.row_id.as_str()).collect();
    let id = format!(
        "{}-GROUP",
        key.category
            .error_id(key.table, &key.site_id, key.column.as_deref())
    );

    ValidationError {
        id,
        table: key.table,
        row_id: row_ids.join(", "),
        site_id: key.site_id.clone(),
        column: key.column.clone(),
        message: group_message(key, members.len()),
        severity: key.severity,
        error_type: key.error_type,
        category: key.category,
    }
}

fn group_message(key: &GroupKey, n: usize) -> String {
    let site = &key.site_id;
    let column = key.column.as_deref().unwrap_or("-");
    match key.category {
        CheckCategory::MissingColumn => {
            format!("{n} header checks report column {column} missing")
        }
        CheckCategory::OrphanRecord => {
            format!("{n} orphan records for site {site} (not found in Collar)")
        }
        CheckCategory::ExceededEoh => format!("{n} intervals exceeded EOH on site {site}"),
        CheckCategory::BottomCoverage => {
            format!("{n} intervals fall short of EOH on site {site}")
        }
        CheckCategory::SurveyExceededEoh => {
            format!("{n} survey points exceeded EOH on site {site}")
        }
        CheckCategory::ZeroLength => format!("{n} zero-length intervals on site {site}"),
        CheckCategory::Inverted => format!("{n} inverted intervals on site {site}"),
        CheckCategory::Overlap => format!("{n} overlapping intervals on site {site}"),
        CheckCategory::Gap => format!("{n} gaps between intervals on site {site}"),
        CheckCategory::MissingValue => {
            format!("{n} rows missing mandatory {column} on site {site}")
        }
        CheckCategory::BelowMinimum => {
            format!("{n} values of {column} below minimum on site {site}")
        }
        CheckCategory::AboveMaximum => {
            format!("{n} values of {column} above maximum on site {site}")
        }
        CheckCategory::InvalidCode => format!("{n} invalid codes in {column} on site {site}"),
    }
}
