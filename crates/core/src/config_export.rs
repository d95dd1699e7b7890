//! Rule configuration snapshot and its portable JSON envelope.
//!
//! The configuration store persists and exchanges rule sets as
//! `{timestamp, version, libraries, configs}`. The engine only ever consumes
//! the [`ConfigSnapshot`] inside; where the envelope came from is not its
//! concern.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::library::CodeLibrary;
use crate::rules::{TableConfig, TableType};
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Active table rule sets plus the code libraries they reference.
///
/// Passed by reference into every validation run; never mutated by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    #[serde(default)]
    pub configs: Vec<TableConfig>,
    #[serde(default)]
    pub libraries: Vec<CodeLibrary>,
}

impl ConfigSnapshot {
    pub fn new(configs: Vec<TableConfig>, libraries: Vec<CodeLibrary>) -> Self {
        Self { configs, libraries }
    }

    /// The active rule set for a table. The first entry wins on duplicates.
    pub fn table(&self, table: TableType) -> Option<&TableConfig> {
        self.configs.iter().find(|c| c.table_type == table)
    }

    /// Resolve a library id. The first entry wins on duplicates.
    pub fn library(&self, id: &str) -> Option<&CodeLibrary> {
        self.libraries.iter().find(|l| l.id == id)
    }

    /// Wrap this snapshot in an export envelope.
    pub fn to_envelope(&self, version: &str, timestamp: Timestamp) -> ConfigEnvelope {
        ConfigEnvelope {
            timestamp,
            version: version.to_string(),
            libraries: self.libraries.clone(),
            configs: self.configs.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Exported configuration archive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEnvelope {
    /// When the archive was produced. Accepts RFC 3339 or epoch milliseconds.
    #[serde(deserialize_with = "timestamp_from_any")]
    pub timestamp: Timestamp,
    pub version: String,
    #[serde(default)]
    pub libraries: Vec<CodeLibrary>,
    #[serde(default)]
    pub configs: Vec<TableConfig>,
}

impl ConfigEnvelope {
    /// Parse an envelope from JSON text.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn into_snapshot(self) -> ConfigSnapshot {
        ConfigSnapshot {
            configs: self.configs,
            libraries: self.libraries,
        }
    }
}

fn timestamp_from_any<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::String(s) => chrono::DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .map_err(D::Error::custom),
        Value::Number(n) => n
            .as_i64()
            .and_then(chrono::DateTime::<chrono::Utc>::from_timestamp_millis)
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {n}"))),
        other => Err(D::Error::custom(format!(
            "timestamp must be an RFC 3339 string or epoch milliseconds, got {other}"
        ))),
    }
}
