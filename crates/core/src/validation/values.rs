//! Per-cell column rules: mandatory presence, numeric range, and lookup
//! library membership.

use super::report::{CheckCategory, Severity, ValidationError};
use crate::config_export::ConfigSnapshot;
use crate::row::Row;
use crate::rules::{ColumnConfig, ColumnType, LookupRule, RangeRule, TableConfig};

/// Evaluate every configured column rule against every row.
pub fn validate_values(
    rows: &[Row],
    config: &TableConfig,
    snapshot: &ConfigSnapshot,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for row in rows {
        let site = row.site_id();
        for column in &config.columns {
            check_cell(row, &site, column, config, snapshot, &mut errors);
        }
    }
    errors
}

fn check_cell(
    row: &Row,
    site: &str,
    column: &ColumnConfig,
    config: &TableConfig,
    snapshot: &ConfigSnapshot,
    errors: &mut Vec<ValidationError>,
) {
    if row.is_blank(&column.name) {
        if column.is_mandatory {
            errors.push(ValidationError::new(
                CheckCategory::MissingValue,
                Severity::Critical,
                config.table_type,
                &row.id,
                site,
                Some(&column.name),
                format!("Missing value for mandatory column {}", display_name(column)),
            ));
        }
        return;
    }

    if let Some(range) = column.range() {
        if column.column_type != ColumnType::String {
            check_range(row, site, column, range, config, errors);
        }
    }

    if let Some(lookup) = column.lookup() {
        if column.column_type == ColumnType::String {
            check_lookup(row, site, column, lookup, config, snapshot, errors);
        }
    }
}

fn check_range(
    row: &Row,
    site: &str,
    column: &ColumnConfig,
    range: &RangeRule,
    config: &TableConfig,
    errors: &mut Vec<ValidationError>,
) {
    let value = row.number(&column.name);
    let severity = if range.strict {
        Severity::Critical
    } else {
        Severity::Warning
    };

    if let Some(min) = range.min {
        if value < min {
            errors.push(ValidationError::new(
                CheckCategory::BelowMinimum,
                severity,
                config.table_type,
                &row.id,
                site,
                Some(&column.name),
                format!(
                    "Value {value} for {} is too low (minimum {min})",
                    display_name(column)
                ),
            ));
        }
    }
    if let Some(max) = range.max {
        if value > max {
            errors.push(ValidationError::new(
                CheckCategory::AboveMaximum,
                severity,
                config.table_type,
                &row.id,
                site,
                Some(&column.name),
                format!(
                    "Value {value} for {} is too high (maximum {max})",
                    display_name(column)
                ),
            ));
        }
    }
}

fn check_lookup(
    row: &Row,
    site: &str,
    column: &ColumnConfig,
    lookup: &LookupRule,
    config: &TableConfig,
    snapshot: &ConfigSnapshot,
    errors: &mut Vec<ValidationError>,
) {
    // Dangling library ids are reported by the config linter, not here.
    let Some(library) = snapshot.library(&lookup.library_id) else {
        return;
    };
    let value = row.text(&column.name);
    if !library.contains(&value, lookup.case_sensitive) {
        errors.push(ValidationError::new(
            CheckCategory::InvalidCode,
            Severity::Critical,
            config.table_type,
            &row.id,
            site,
            Some(&column.name),
            format!(
                "Invalid code '{value}' for {} (not in library '{}')",
                display_name(column),
                lookup.library_id
            ),
        ));
    }
}

fn display_name(column: &ColumnConfig) -> &str {
    if column.label.is_empty() {
        &column.name
    } else {
        &column.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::CodeLibrary;
    use crate::row::SITE_ID;
    use crate::rules::TableType;
    use serde_json::Value;

    fn survey_config(strict: bool) -> TableConfig {
        TableConfig::new(
            TableType::Survey,
            vec![ColumnConfig::new("AZIMUTH", "Azimuth", ColumnType::Number).with_range(
                Some(0.0),
                Some(360.0),
                strict,
            )],
        )
    }

    fn lith_config(case_sensitive: bool, library_id: &str) -> TableConfig {
        TableConfig::new(
            TableType::Lithology,
            vec![ColumnConfig::new("LITH_CODE", "Lithology", ColumnType::String)
                .with_lookup(library_id, case_sensitive)],
        )
    }

    fn snapshot() -> ConfigSnapshot {
        ConfigSnapshot::new(vec![], vec![CodeLibrary::new("lith", "Lithology", &[("QZ", "Quartz")])])
    }

    fn row(column: &str, value: impl Into<Value>) -> Row {
        Row::new("r1").with(SITE_ID, "DH1").with(column, value)
    }

    #[test]
    fn strict_range_violation_is_critical() {
        let errors = validate_values(&[row("AZIMUTH", 400)], &survey_config(true), &snapshot());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].category, CheckCategory::AboveMaximum);
        assert_eq!(errors[0].severity, Severity::Critical);
        assert!(errors[0].message.contains("too high"));
    }

    #[test]
    fn lenient_range_violation_is_warning() {
        let errors = validate_values(&[row("AZIMUTH", 400)], &survey_config(false), &snapshot());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].severity, Severity::Warning);
    }

    #[test]
    fn below_minimum_is_reported() {
        let errors = validate_values(&[row("AZIMUTH", "-5")], &survey_config(true), &snapshot());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].category, CheckCategory::BelowMinimum);
        assert!(errors[0].message.contains("too low"));
    }

    #[test]
    fn min_and_max_checked_independently() {
        let config = TableConfig::new(
            TableType::Assay,
            vec![ColumnConfig::new("X", "X", ColumnType::Number).with_range(
                Some(10.0),
                Some(5.0),
                false,
            )],
        );
        let errors = validate_values(&[row("X", 7)], &config, &snapshot());
        let cats: Vec<_> = errors.iter().map(|e| e.category).collect();
        assert_eq!(cats, vec![CheckCategory::BelowMinimum, CheckCategory::AboveMaximum]);
    }

    #[test]
    fn non_numeric_text_reads_as_zero() {
        let config = TableConfig::new(
            TableType::Assay,
            vec![ColumnConfig::new("AU_PPM", "Au", ColumnType::Number).with_range(
                Some(1.0),
                None,
                true,
            )],
        );
        let errors = validate_values(&[row("AU_PPM", "n/a")], &config, &snapshot());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Value 0"));
    }

    #[test]
    fn range_ignored_on_string_columns() {
        let config = TableConfig::new(
            TableType::Assay,
            vec![ColumnConfig::new("NOTE", "Note", ColumnType::String).with_range(
                Some(0.0),
                Some(1.0),
                true,
            )],
        );
        assert!(validate_values(&[row("NOTE", 50)], &config, &snapshot()).is_empty());
    }

    #[test]
    fn lookup_is_case_folded_by_default() {
        let config = lith_config(false, "lith");
        assert!(validate_values(&[row("LITH_CODE", "qz")], &config, &snapshot()).is_empty());

        let errors = validate_values(&[row("LITH_CODE", "XX")], &config, &snapshot());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].category, CheckCategory::InvalidCode);
        assert_eq!(errors[0].severity, Severity::Critical);
    }

    #[test]
    fn case_sensitive_lookup() {
        let config = lith_config(true, "lith");
        let errors = validate_values(&[row("LITH_CODE", "qz")], &config, &snapshot());
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn unknown_library_is_skipped() {
        let config = lith_config(false, "missing");
        assert!(validate_values(&[row("LITH_CODE", "XX")], &config, &snapshot()).is_empty());
    }

    #[test]
    fn mandatory_blank_short_circuits_other_checks() {
        let mut config = survey_config(true);
        config.columns[0].is_mandatory = true;
        let errors = validate_values(&[row("AZIMUTH", "")], &config, &snapshot());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].category, CheckCategory::MissingValue);
        assert_eq!(errors[0].severity, Severity::Critical);
    }

    #[test]
    fn optional_blank_passes() {
        let errors = validate_values(&[row("AZIMUTH", Value::Null)], &survey_config(true), &snapshot());
        assert!(errors.is_empty());
        let absent = Row::new("r2").with(SITE_ID, "DH1");
        assert!(validate_values(&[absent], &survey_config(true), &snapshot()).is_empty());
    }
}
