//! Canonical column type names.

use std::collections::HashMap;

use once_cell::sync::Lazy;

// Synonym table for column type canonicalization. Keys are lower-cased;
// every value is a fixed point of the table so canonicalization is
// idempotent.
static TYPE_SYNONYMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("integer", "int"),
        ("int", "int"),
        ("bigint", "bigint"),
        ("string", "varchar(255)"),
        ("str", "varchar(255)"),
        ("varchar", "varchar(255)"),
        ("text", "text"),
        ("bool", "boolean"),
        ("boolean", "boolean"),
        ("datetime", "timestamp"),
        ("timestamp", "timestamp"),
        ("date", "date"),
        ("time", "time"),
        ("decimal", "decimal(10,2)"),
        ("numeric", "decimal(10,2)"),
        ("float", "decimal(10,2)"),
        ("double", "decimal(10,2)"),
        ("uuid", "uuid"),
        ("json", "jsonb"),
        ("jsonb", "jsonb"),
    ])
});

/// Resolve a column type name against the synonym table.
///
/// The lookup key is the lower-cased, trimmed input. Unrecognized type
/// strings pass through unchanged.
pub fn canonical_type(raw: &str) -> String {
    let key = raw.trim().to_lowercase();
    match TYPE_SYNONYMS.get(key.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => raw.to_string(),
    }
}
