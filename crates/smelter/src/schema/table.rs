//! Table-level schema definition.

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::column::ColumnSpec;

/// A suggested relationship between two tables.
///
/// Table and column fields are sanitized identifiers;
/// `relationship_type`, `confidence`, and `reason` are lower-cased
/// free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipSpec {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
    /// Relationship kind (e.g. `one_to_many`).
    pub relationship_type: String,
    /// Confidence label (e.g. `low`, `medium`, `high`).
    pub confidence: String,
    /// Short rationale for the suggestion.
    pub reason: String,
}

impl RelationshipSpec {
    /// The uniqueness key for a relationship suggestion.
    pub fn key(&self) -> (String, String, String, String, String) {
        (
            self.from_table.clone(),
            self.from_column.clone(),
            self.to_table.clone(),
            self.to_column.clone(),
            self.relationship_type.clone(),
        )
    }
}

/// Canonical table-schema record produced by normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    /// Sanitized table name.
    pub label: String,
    /// Column specifications, in order.
    pub columns: Vec<ColumnSpec>,
    /// Suggested relationships, de-duplicated on their 5-tuple key.
    #[serde(default)]
    pub suggested_relationships: Vec<RelationshipSpec>,
    /// Diagnostic message carried through from a failed decode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TableSpec {
    /// Create an empty table spec with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            columns: Vec::new(),
            suggested_relationships: Vec::new(),
            error: None,
        }
    }

    /// The fixed minimal structure returned when decoding fails outright.
    pub fn last_resort(error: impl Into<String>) -> Self {
        Self {
            label: "error_table".to_string(),
            columns: Vec::new(),
            suggested_relationships: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The primary-key column. Normalization guarantees exactly one.
    pub fn primary_key(&self) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.is_primary_key)
    }

    /// Foreign-key columns, in table order.
    pub fn foreign_keys(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| c.is_foreign_key)
    }

    /// Render as pretty-printed JSON.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
