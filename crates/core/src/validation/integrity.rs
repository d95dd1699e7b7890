//! Cross-table referential integrity: child rows must point at a Collar.

use std::collections::HashSet;

use super::report::{CheckCategory, Severity, ValidationError};
use crate::row::{Row, SITE_ID};
use crate::rules::TableType;

/// The set of non-blank site keys declared by Collar rows.
pub fn collar_site_keys(collars: &[Row]) -> HashSet<String> {
    collars
        .iter()
        .map(Row::site_key)
        .filter(|key| !key.trim().is_empty())
        .collect()
}

/// Report every child row whose `SITE_ID` has no matching Collar row.
///
/// A blank `SITE_ID` never matches, even if a Collar row is blank too.
pub fn validate_integrity(
    collar_sites: &HashSet<String>,
    rows: &[Row],
    table: TableType,
) -> Vec<ValidationError> {
    rows.iter()
        .filter(|row| {
            let key = row.site_key();
            key.trim().is_empty() || !collar_sites.contains(&key)
        })
        .map(|row| {
            let site = row.site_id();
            ValidationError::new(
                CheckCategory::OrphanRecord,
                Severity::Critical,
                table,
                &row.id,
                &site,
                Some(SITE_ID),
                format!("Orphan record: site '{site}' does not exist in the Collar table"),
            )
        })
        .collect()
}
