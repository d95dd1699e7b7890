//! Header completeness against a table's schema-required columns.

use std::collections::HashSet;

use super::report::{CheckCategory, Severity, ValidationError};
use crate::row::Row;
use crate::rules::TableConfig;

/// Row id used for header-level findings.
pub const HEADER_ROW_ID: &str = "HEADER";
/// Site id used for findings that belong to no single hole.
pub const SYSTEM_SITE_ID: &str = "SYSTEM";

/// Report each schema-required column missing from the table header.
///
/// The header is the column set of the first row; an empty table has no
/// header and produces nothing.
pub fn validate_structure(rows: &[Row], config: &TableConfig) -> Vec<ValidationError> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    let header: HashSet<&str> = first.columns().collect();

    config
        .columns
        .iter()
        .filter(|col| col.is_schema_required && !header.contains(col.name.as_str()))
        .map(|col| {
            ValidationError::new(
                CheckCategory::MissingColumn,
                Severity::Critical,
                config.table_type,
                HEADER_ROW_ID,
                SYSTEM_SITE_ID,
                Some(&col.name),
                format!(
                    "Required column '{}' is missing from the {} table",
                    col.name, config.table_type
                ),
            )
        })
        .collect()
}
