//! Drillhole table rows and the dataset they are grouped into.
//!
//! A row is a stable `id` plus an ordered, open-ended map from canonical
//! uppercase column name to scalar value. The handful of keys the engine
//! relies on (`SITE_ID`, `END_DEPTH`, `DEPTH`, `DEPTH_FROM`, `DEPTH_TO`) are
//! read through typed accessors; everything else stays free-form so that
//! user-configured columns need no code changes.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::numeric::to_number;
use crate::rules::TableType;

// ---------------------------------------------------------------------------
// Canonical column names
// ---------------------------------------------------------------------------

pub const SITE_ID: &str = "SITE_ID";
pub const END_DEPTH: &str = "END_DEPTH";
pub const DEPTH: &str = "DEPTH";
pub const DEPTH_FROM: &str = "DEPTH_FROM";
pub const DEPTH_TO: &str = "DEPTH_TO";

/// Keys checked, in order, when deriving a row's display site identifier.
pub const SITE_KEY_FALLBACKS: &[&str] = &[SITE_ID, "HOLE_ID", "HOLEID", "BHID", "DHID", "SITEID"];

/// Display identifier used when no site key carries a value.
pub const UNKNOWN_SITE: &str = "UNKNOWN";

// ---------------------------------------------------------------------------
// Row
// ---------------------------------------------------------------------------

/// One record of a drillhole table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(deserialize_with = "id_from_scalar")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Row {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style setter, mostly used to assemble fixtures.
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(column.to_string(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    /// Column names present on this row, in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// The cell rendered as trimmed text (`""` when absent or null).
    pub fn text(&self, column: &str) -> String {
        self.get(column).map(scalar_to_string).unwrap_or_default()
    }

    /// The cell coerced to a number (`0.0` when absent or unparsable).
    pub fn number(&self, column: &str) -> f64 {
        to_number(self.get(column))
    }

    /// Whether the cell is absent, null, or blank text.
    pub fn is_blank(&self, column: &str) -> bool {
        self.get(column).map_or(true, is_blank_value)
    }

    /// The raw `SITE_ID` value used for cross-table membership.
    pub fn site_key(&self) -> String {
        self.text(SITE_ID)
    }

    /// Display site identifier, following [`SITE_KEY_FALLBACKS`].
    pub fn site_id(&self) -> String {
        SITE_KEY_FALLBACKS
            .iter()
            .map(|key| self.text(key))
            .find(|s| !s.is_empty())
            .unwrap_or_else(|| UNKNOWN_SITE.to_string())
    }

    pub fn end_depth(&self) -> f64 {
        self.number(END_DEPTH)
    }

    pub fn depth(&self) -> f64 {
        self.number(DEPTH)
    }

    pub fn depth_from(&self) -> f64 {
        self.number(DEPTH_FROM)
    }

    pub fn depth_to(&self) -> f64 {
        self.number(DEPTH_TO)
    }
}

/// Render a scalar as trimmed text. Numbers keep their JSON spelling.
pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn is_blank_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Accept both `"id": "r-1"` and `"id": 17`.
fn id_from_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "row id must be a string or number, got {other}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Row collections for every table type in one validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    tables: BTreeMap<TableType, Vec<Row>>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: TableType, rows: Vec<Row>) -> Self {
        self.insert(table, rows);
        self
    }

    pub fn insert(&mut self, table: TableType, rows: Vec<Row>) {
        self.tables.insert(table, rows);
    }

    /// Rows for a table, empty when the table was not supplied.
    pub fn rows(&self, table: TableType) -> &[Row] {
        self.tables.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total_rows(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn site_id_prefers_canonical_key() {
        let row = Row::new("1").with("HOLE_ID", "H-9").with(SITE_ID, "DH001");
        assert_eq!(row.site_id(), "DH001");
    }

    #[test]
    fn site_id_falls_back_through_chain() {
        let row = Row::new("1").with(SITE_ID, "  ").with("BHID", "B-7");
        assert_eq!(row.site_id(), "B-7");
        assert_eq!(row.site_key(), "");
    }

    #[test]
    fn site_id_unknown_when_no_key_present() {
        let row = Row::new("1").with("AZIMUTH", 10);
        assert_eq!(row.site_id(), UNKNOWN_SITE);
    }

    #[test]
    fn numeric_site_ids_render_without_quotes() {
        let row = Row::new("1").with(SITE_ID, 1001);
        assert_eq!(row.site_key(), "1001");
    }

    #[test]
    fn blank_detection() {
        let row = Row::new("1")
            .with("A", "")
            .with("B", "  ")
            .with("C", Value::Null)
            .with("D", 0);
        assert!(row.is_blank("A"));
        assert!(row.is_blank("B"));
        assert!(row.is_blank("C"));
        assert!(row.is_blank("MISSING"));
        assert!(!row.is_blank("D"));
    }

    #[test]
    fn deserializes_flat_object_with_numeric_id() {
        let row: Row = serde_json::from_value(json!({
            "id": 17,
            "SITE_ID": "DH1",
            "DEPTH_FROM": "1.5",
            "DEPTH_TO": 3
        }))
        .unwrap();
        assert_eq!(row.id, "17");
        assert_eq!(row.depth_from(), 1.5);
        assert_eq!(row.depth_to(), 3.0);
        let cols: Vec<&str> = row.columns().collect();
        assert_eq!(cols, vec!["SITE_ID", "DEPTH_FROM", "DEPTH_TO"]);
    }

    #[test]
    fn rejects_object_id() {
        let err = serde_json::from_value::<Row>(json!({ "id": {"x": 1} }));
        assert!(err.is_err());
    }

    #[test]
    fn dataset_missing_table_is_empty() {
        let ds = Dataset::new().with_table(TableType::Collar, vec![Row::new("c1")]);
        assert_eq!(ds.rows(TableType::Collar).len(), 1);
        assert!(ds.rows(TableType::Assay).is_empty());
        assert_eq!(ds.total_rows(), 1);
    }
}
