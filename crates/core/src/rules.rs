//! Table and column rule types.
//!
//! These mirror the JSON shape produced by the configuration store, so a
//! `configs` array exported from the rule editor deserializes directly into
//! `Vec<TableConfig>`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Table types
// ---------------------------------------------------------------------------

/// The kind of drillhole table a row collection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableType {
    Collar,
    Survey,
    Lithology,
    Assay,
    Mineralization,
    Oxidation,
    Geotech,
    Rqd,
    Vein,
    Alteration,
    Density,
}

/// Interval tables in the order the orchestrator visits them.
pub const INTERVAL_TABLES: &[TableType] = &[
    TableType::Lithology,
    TableType::Assay,
    TableType::Mineralization,
    TableType::Oxidation,
    TableType::Geotech,
    TableType::Rqd,
    TableType::Vein,
    TableType::Alteration,
    TableType::Density,
];

impl TableType {
    /// Stable string representation matching serde's `SCREAMING_SNAKE_CASE`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Collar => "COLLAR",
            Self::Survey => "SURVEY",
            Self::Lithology => "LITHOLOGY",
            Self::Assay => "ASSAY",
            Self::Mineralization => "MINERALIZATION",
            Self::Oxidation => "OXIDATION",
            Self::Geotech => "GEOTECH",
            Self::Rqd => "RQD",
            Self::Vein => "VEIN",
            Self::Alteration => "ALTERATION",
            Self::Density => "DENSITY",
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Column rules
// ---------------------------------------------------------------------------

/// Declared value type of a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    String,
    #[serde(alias = "numeric", alias = "float", alias = "integer")]
    Number,
}

/// Numeric bounds. `strict` violations are CRITICAL, others WARNING.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default)]
    pub strict: bool,
}

/// Membership in a named code library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRule {
    pub library_id: String,
    #[serde(default)]
    pub case_sensitive: bool,
}

/// The single value check attached to a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawColumnRule", into = "RawColumnRule")]
pub enum ColumnRule {
    Range(RangeRule),
    Lookup(LookupRule),
    /// Values must exist among Collar site identifiers.
    KeyReference,
}

/// Wire shape of a validation block: `{range?, lookup?, isKeyReference?}`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawColumnRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    range: Option<RangeRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lookup: Option<LookupRule>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    is_key_reference: bool,
}

impl RawColumnRule {
    fn is_empty(&self) -> bool {
        self.range.is_none() && self.lookup.is_none() && !self.is_key_reference
    }
}

impl TryFrom<RawColumnRule> for ColumnRule {
    type Error = CoreError;

    fn try_from(raw: RawColumnRule) -> Result<Self, Self::Error> {
        match (raw.range, raw.lookup, raw.is_key_reference) {
            (Some(range), None, false) => Ok(Self::Range(range)),
            (None, Some(lookup), false) => Ok(Self::Lookup(lookup)),
            (None, None, true) => Ok(Self::KeyReference),
            (None, None, false) => Err(CoreError::Config(
                "validation block must define range, lookup, or isKeyReference".to_string(),
            )),
            _ => Err(CoreError::Config(
                "validation block may hold only one of range, lookup, or isKeyReference"
                    .to_string(),
            )),
        }
    }
}

impl From<ColumnRule> for RawColumnRule {
    fn from(rule: ColumnRule) -> Self {
        match rule {
            ColumnRule::Range(range) => Self {
                range: Some(range),
                ..Self::default()
            },
            ColumnRule::Lookup(lookup) => Self {
                lookup: Some(lookup),
                ..Self::default()
            },
            ColumnRule::KeyReference => Self {
                is_key_reference: true,
                ..Self::default()
            },
        }
    }
}

/// Rule for one column of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    /// Canonical uppercase column name.
    pub name: String,
    #[serde(default)]
    pub label: String,
    /// The header must contain this column.
    #[serde(default)]
    pub is_schema_required: bool,
    /// Every row must carry a non-empty value.
    #[serde(default)]
    pub is_mandatory: bool,
    /// Untyped columns are treated as text.
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    /// A missing, null or empty block means the column has no value rule.
    #[serde(
        default,
        deserialize_with = "optional_rule",
        skip_serializing_if = "Option::is_none"
    )]
    pub validation: Option<ColumnRule>,
}

impl ColumnConfig {
    pub fn new(name: &str, label: &str, column_type: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            is_schema_required: false,
            is_mandatory: false,
            column_type,
            validation: None,
        }
    }

    /// Mark as both schema-required and mandatory.
    pub fn required(mut self) -> Self {
        self.is_schema_required = true;
        self.is_mandatory = true;
        self
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>, strict: bool) -> Self {
        self.validation = Some(ColumnRule::Range(RangeRule { min, max, strict }));
        self
    }

    pub fn with_lookup(mut self, library_id: &str, case_sensitive: bool) -> Self {
        self.validation = Some(ColumnRule::Lookup(LookupRule {
            library_id: library_id.to_string(),
            case_sensitive,
        }));
        self
    }

    pub fn range(&self) -> Option<&RangeRule> {
        match &self.validation {
            Some(ColumnRule::Range(r)) => Some(r),
            _ => None,
        }
    }

    pub fn lookup(&self) -> Option<&LookupRule> {
        match &self.validation {
            Some(ColumnRule::Lookup(l)) => Some(l),
            _ => None,
        }
    }
}

fn optional_rule<'de, D>(deserializer: D) -> Result<Option<ColumnRule>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<RawColumnRule>::deserialize(deserializer)? {
        Some(raw) if !raw.is_empty() => ColumnRule::try_from(raw)
            .map(Some)
            .map_err(D::Error::custom),
        _ => Ok(None),
    }
}

/// Ordered column rules for one table type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    pub table_type: TableType,
    pub columns: Vec<ColumnConfig>,
}

impl TableConfig {
    pub fn new(table_type: TableType, columns: Vec<ColumnConfig>) -> Self {
        Self {
            table_type,
            columns,
        }
    }
}
