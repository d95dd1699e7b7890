//! Finding and summary types produced by a validation run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rules::TableType;

/// How blocking a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// Broad class of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    /// Schema / header problems.
    Structure,
    /// Dangling cross-table references.
    Integrity,
    /// Depth versus total-depth violations.
    Logic,
    /// Interval geometry defects.
    Interval,
    /// Column rule violations.
    Value,
}

/// The specific check that produced a finding.
///
/// Drives error ids and the aggregator's grouping key, so grouping never
/// depends on message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckCategory {
    MissingColumn,
    OrphanRecord,
    ExceededEoh,
    BottomCoverage,
    SurveyExceededEoh,
    ZeroLength,
    Inverted,
    Overlap,
    Gap,
    MissingValue,
    BelowMinimum,
    AboveMaximum,
    InvalidCode,
}

impl CheckCategory {
    /// Prefix used when building deterministic error ids.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::MissingColumn => "STR-COL",
            Self::OrphanRecord => "INT-ORPHAN",
            Self::ExceededEoh => "EOH-EXCEED",
            Self::BottomCoverage => "EOH-BOTTOM",
            Self::SurveyExceededEoh => "EOH-SURVEY",
            Self::ZeroLength => "GEO-ZERO",
            Self::Inverted => "GEO-INVERT",
            Self::Overlap => "GEO-OVERLAP",
            Self::Gap => "GEO-GAP",
            Self::MissingValue => "VAL-MISSING",
            Self::BelowMinimum => "VAL-MIN",
            Self::AboveMaximum => "VAL-MAX",
            Self::InvalidCode => "VAL-CODE",
        }
    }

    pub fn error_type(&self) -> ErrorType {
        match self {
            Self::MissingColumn => ErrorType::Structure,
            Self::OrphanRecord => ErrorType::Integrity,
            Self::ExceededEoh | Self::BottomCoverage | Self::SurveyExceededEoh => ErrorType::Logic,
            Self::ZeroLength | Self::Inverted | Self::Overlap | Self::Gap => ErrorType::Interval,
            Self::MissingValue | Self::BelowMinimum | Self::AboveMaximum | Self::InvalidCode => {
                ErrorType::Value
            }
        }
    }

    /// `{PREFIX}-{TABLE}-{KEY}[-{COLUMN}]`
    pub fn error_id(&self, table: TableType, key: &str, column: Option<&str>) -> String {
        match column {
            Some(column) => format!("{}-{}-{}-{}", self.prefix(), table, key, column),
            None => format!("{}-{}-{}", self.prefix(), table, key),
        }
    }
}

/// One data-quality finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub id: String,
    pub table: TableType,
    pub row_id: String,
    pub site_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub message: String,
    pub severity: Severity,
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    pub category: CheckCategory,
}

impl ValidationError {
    /// Build a finding whose id and type derive from `category`.
    pub fn new(
        category: CheckCategory,
        severity: Severity,
        table: TableType,
        row_id: &str,
        site_id: &str,
        column: Option<&str>,
        message: String,
    ) -> Self {
        Self {
            id: category.error_id(table, row_id, column),
            table,
            row_id: row_id.to_string(),
            site_id: site_id.to_string(),
            column: column.map(str::to_string),
            message,
            severity,
            error_type: category.error_type(),
            category,
        }
    }
}

/// Final report of one validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    /// Count of CRITICAL findings.
    pub total_errors: usize,
    /// Count of WARNING findings.
    pub total_warnings: usize,
    pub errors: Vec<ValidationError>,
}

impl ValidationSummary {
    /// Compute the totals over an (already aggregated) finding list.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        let count = |s: Severity| errors.iter().filter(|e| e.severity == s).count();
        Self {
            total_errors: count(Severity::Critical),
            total_warnings: count(Severity::Warning),
            errors,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn total_info(&self) -> usize {
        self.by_severity(Severity::Info).count()
    }

    pub fn by_severity(&self, severity: Severity) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.severity == severity)
    }

    /// Case-insensitive substring search over message, site, row, column and table.
    pub fn search(&self, query: &str) -> Vec<&ValidationError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.errors.iter().collect();
        }
        self.errors
            .iter()
            .filter(|e| {
                e.message.to_lowercase().contains(&needle)
                    || e.site_id.to_lowercase().contains(&needle)
                    || e.row_id.to_lowercase().contains(&needle)
                    || e.table.as_str().to_lowercase().contains(&needle)
                    || e
                        .column
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn count_by_table(&self) -> BTreeMap<TableType, usize> {
        let mut counts = BTreeMap::new();
        for e in &self.errors {
            *counts.entry(e.table).or_insert(0) += 1;
        }
        counts
    }
}
