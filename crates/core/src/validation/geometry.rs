//! Interval geometry within each hole: zero-length, inverted, overlapping
//! and gapped intervals.

use indexmap::IndexMap;

use super::report::{CheckCategory, Severity, ValidationError};
use crate::row::{Row, DEPTH_FROM, DEPTH_TO};
use crate::rules::TableType;

/// Group rows by display site id, keeping first-appearance order, and
/// stable-sort each group by `DEPTH_FROM`.
pub fn sorted_by_site(rows: &[Row]) -> IndexMap<String, Vec<&Row>> {
    let mut groups: IndexMap<String, Vec<&Row>> = IndexMap::new();
    for row in rows {
        groups.entry(row.site_id()).or_default().push(row);
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| a.depth_from().total_cmp(&b.depth_from()));
    }
    groups
}

/// Check every site's sorted interval sequence.
///
/// The per-row checks are independent: one row can be zero-length or
/// inverted and also overlap (or leave a gap after) its predecessor.
pub fn validate_geometry(rows: &[Row], table: TableType) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (site, intervals) in sorted_by_site(rows) {
        let mut previous: Option<&Row> = None;
        for row in intervals {
            let from = row.depth_from();
            let to = row.depth_to();

            if from == to {
                errors.push(ValidationError::new(
                    CheckCategory::ZeroLength,
                    Severity::Warning,
                    table,
                    &row.id,
                    &site,
                    Some(DEPTH_TO),
                    format!("Zero-length interval at {from} on site {site}"),
                ));
            }
            if from > to {
                errors.push(ValidationError::new(
                    CheckCategory::Inverted,
                    Severity::Critical,
                    table,
                    &row.id,
                    &site,
                    Some(DEPTH_FROM),
                    format!("Inverted interval: DEPTH_FROM {from} is greater than DEPTH_TO {to} on site {site}"),
                ));
            }
            if let Some(prev) = previous {
                let prev_to = prev.depth_to();
                if from < prev_to {
                    errors.push(ValidationError::new(
                        CheckCategory::Overlap,
                        Severity::Critical,
                        table,
                        &row.id,
                        &site,
                        Some(DEPTH_FROM),
                        format!(
                            "Interval {from}-{to} overlaps previous interval ending at {prev_to} on site {site}"
                        ),
                    ));
                } else if from > prev_to {
                    errors.push(ValidationError::new(
                        CheckCategory::Gap,
                        Severity::Warning,
                        table,
                        &row.id,
                        &site,
                        Some(DEPTH_FROM),
                        format!("Gap from {prev_to} to {from} on site {site}"),
                    ));
                }
            }
            previous = Some(row);
        }
    }

    errors
}
