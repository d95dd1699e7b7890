//! Code libraries: controlled vocabularies referenced by lookup rules.

use serde::{Deserialize, Serialize};

/// One allowed code and its description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeItem {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

/// A named set of codes, referenced by `libraryId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeLibrary {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<CodeItem>,
}

impl CodeLibrary {
    pub fn new(id: &str, name: &str, codes: &[(&str, &str)]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            items: codes
                .iter()
                .map(|(code, description)| CodeItem {
                    code: code.to_string(),
                    description: description.to_string(),
                })
                .collect(),
        }
    }

    /// Whether `value` is one of this library's codes.
    ///
    /// Both sides are trimmed; unless `case_sensitive`, the comparison is
    /// case-folded.
    pub fn contains(&self, value: &str, case_sensitive: bool) -> bool {
        let value = value.trim();
        self.items.iter().any(|item| {
            let code = item.code.trim();
            if case_sensitive {
                code == value
            } else {
                code.to_uppercase() == value.to_uppercase()
            }
        })
    }
}
