//! Configuration diagnostics.
//!
//! The engine tolerates several configuration mistakes silently (a lookup
//! rule pointing at a library that does not exist simply never fires). The
//! linter reports them separately so they can be shown next to the summary
//! without changing what the engine emits.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config_export::ConfigSnapshot;
use crate::rules::{ColumnType, TableType};
use crate::validation::report::Severity;

// ---------------------------------------------------------------------------
// Issue codes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    UnknownLibrary,
    RangeBoundsInverted,
    RangeOnStringColumn,
    LookupOnNumericColumn,
    DuplicateTableConfig,
    DuplicateColumn,
    DuplicateLibrary,
}

/// A single configuration problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigIssue {
    pub code: IssueCode,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<TableType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub message: String,
}

impl ConfigIssue {
    fn warning(
        code: IssueCode,
        table: Option<TableType>,
        column: Option<&str>,
        message: String,
    ) -> Self {
        Self {
            code,
            severity: Severity::Warning,
            table,
            column: column.map(str::to_string),
            message,
        }
    }
}

// ---------------------------------------------------------------------------
// Lint
// ---------------------------------------------------------------------------

/// Inspect a snapshot for rules that can never fire or are ambiguous.
pub fn lint(snapshot: &ConfigSnapshot) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    let mut library_ids = HashSet::new();
    for library in &snapshot.libraries {
        if !library_ids.insert(library.id.as_str()) {
            issues.push(ConfigIssue::warning(
                IssueCode::DuplicateLibrary,
                None,
                None,
                format!(
                    "Library '{}' is defined more than once; the first definition is used",
                    library.id
                ),
            ));
        }
    }

    let mut tables = HashSet::new();
    for config in &snapshot.configs {
        let table = config.table_type;
        if !tables.insert(table) {
            issues.push(ConfigIssue::warning(
                IssueCode::DuplicateTableConfig,
                Some(table),
                None,
                format!("{table} has more than one rule set; only the first is applied"),
            ));
        }

        let mut columns = HashSet::new();
        for column in &config.columns {
            let name = column.name.as_str();
            if !columns.insert(name) {
                issues.push(ConfigIssue::warning(
                    IssueCode::DuplicateColumn,
                    Some(table),
                    Some(name),
                    format!("Column {name} is configured more than once in {table}"),
                ));
            }

            if let Some(range) = column.range() {
                if column.column_type == ColumnType::String {
                    issues.push(ConfigIssue::warning(
                        IssueCode::RangeOnStringColumn,
                        Some(table),
                        Some(name),
                        format!("Range rule on text column {name} is never evaluated"),
                    ));
                }
                if let (Some(min), Some(max)) = (range.min, range.max) {
                    if min > max {
                        issues.push(ConfigIssue::warning(
                            IssueCode::RangeBoundsInverted,
                            Some(table),
                            Some(name),
                            format!(
                                "Range for {name} has min {min} above max {max}; every value will fail"
                            ),
                        ));
                    }
                }
            }

            if let Some(lookup) = column.lookup() {
                if column.column_type != ColumnType::String {
                    issues.push(ConfigIssue::warning(
                        IssueCode::LookupOnNumericColumn,
                        Some(table),
                        Some(name),
                        format!("Lookup rule on numeric column {name} is never evaluated"),
                    ));
                }
                if snapshot.library(&lookup.library_id).is_none() {
                    issues.push(ConfigIssue::warning(
                        IssueCode::UnknownLibrary,
                        Some(table),
                        Some(name),
                        format!(
                            "Column {name} references unknown library '{}'; the lookup is skipped",
                            lookup.library_id
                        ),
                    ));
                }
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::CodeLibrary;
    use crate::rules::{ColumnConfig, TableConfig};

    fn codes(issues: &[ConfigIssue]) -> Vec<IssueCode> {
        issues.iter().map(|i| i.code).collect()
    }

    #[test]
    fn clean_snapshot_has_no_issues() {
        assert!(lint(&crate::defaults::default_snapshot()).is_empty());
    }

    #[test]
    fn reports_unknown_library() {
        let snap = ConfigSnapshot::new(
            vec![TableConfig::new(
                TableType::Lithology,
                vec![ColumnConfig::new("LITH_CODE", "Lith", ColumnType::String)
                    .with_lookup("nope", false)],
            )],
            vec![],
        );
        let issues = lint(&snap);
        assert_eq!(codes(&issues), vec![IssueCode::UnknownLibrary]);
        assert_eq!(issues[0].column.as_deref(), Some("LITH_CODE"));
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn reports_type_mismatches_and_inverted_bounds() {
        let snap = ConfigSnapshot::new(
            vec![TableConfig::new(
                TableType::Assay,
                vec![
                    ColumnConfig::new("NOTE", "Note", ColumnType::String).with_range(
                        Some(5.0),
                        Some(1.0),
                        false,
                    ),
                    ColumnConfig::new("AU_PPM", "Au", ColumnType::Number).with_lookup("lith", false),
                ],
            )],
            vec![CodeLibrary::new("lith", "Lithology", &[("QZ", "")])],
        );
        assert_eq!(
            codes(&lint(&snap)),
            vec![
                IssueCode::RangeOnStringColumn,
                IssueCode::RangeBoundsInverted,
                IssueCode::LookupOnNumericColumn,
            ]
        );
    }

    #[test]
    fn reports_duplicates() {
        let table = TableConfig::new(
            TableType::Vein,
            vec![
                ColumnConfig::new("VEIN_TYPE", "Vein", ColumnType::String),
                ColumnConfig::new("VEIN_TYPE", "Vein", ColumnType::String),
            ],
        );
        let snap = ConfigSnapshot::new(
            vec![table.clone(), table],
            vec![
                CodeLibrary::new("lith", "A", &[]),
                CodeLibrary::new("lith", "B", &[]),
            ],
        );
        assert_eq!(
            codes(&lint(&snap)),
            vec![
                IssueCode::DuplicateLibrary,
                IssueCode::DuplicateColumn,
                IssueCode::DuplicateTableConfig,
                IssueCode::DuplicateColumn,
            ]
        );
    }
}
