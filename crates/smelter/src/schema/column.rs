//! Column-level schema definition.

use serde::{Deserialize, Serialize};

/// Specification of a single table column.
///
/// Wire field names keep the camelCase contract the ERD frontend
/// expects (`isPrimaryKey`, `referencedTable`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Stable identifier, unique within the table.
    pub id: String,
    /// Sanitized column name, unique within the table.
    pub name: String,
    /// Canonical column type (e.g. `int`, `varchar(255)`).
    #[serde(rename = "type")]
    pub column_type: String,
    /// Whether this column is the table's primary key.
    #[serde(rename = "isPrimaryKey")]
    pub is_primary_key: bool,
    /// Whether this column references another table.
    #[serde(rename = "isForeignKey")]
    pub is_foreign_key: bool,
    /// Whether null values are allowed. Always false for primary keys.
    #[serde(rename = "isNullable")]
    pub is_nullable: bool,
    /// Table referenced by a foreign-key column.
    #[serde(rename = "referencedTable", skip_serializing_if = "Option::is_none")]
    pub referenced_table: Option<String>,
    /// Column referenced by a foreign-key column.
    #[serde(rename = "referencedColumn", skip_serializing_if = "Option::is_none")]
    pub referenced_column: Option<String>,
}

impl ColumnSpec {
    /// Create a plain, non-key column.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        column_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            column_type: column_type.into(),
            is_primary_key: false,
            is_foreign_key: false,
            is_nullable: true,
            referenced_table: None,
            referenced_column: None,
        }
    }

    /// Create a non-nullable uuid primary-key column.
    pub fn primary_key(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            column_type: "uuid".to_string(),
            is_primary_key: true,
            is_foreign_key: false,
            is_nullable: false,
            referenced_table: None,
            referenced_column: None,
        }
    }

    /// Create a non-nullable timestamp column (for `created_at`/`updated_at`).
    pub fn timestamp(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            column_type: "timestamp".to_string(),
            is_primary_key: false,
            is_foreign_key: false,
            is_nullable: false,
            referenced_table: None,
            referenced_column: None,
        }
    }
}
