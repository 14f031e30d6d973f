//! Schema normalization: loosely-typed decoded values to canonical
//! [`TableSpec`] records.
//!
//! `normalize` is a total, deterministic function with no failure mode:
//! every malformed or missing field has a defined default. All
//! de-duplication state is request-local.

mod identifier;

pub use identifier::{sanitize_identifier, UniqueNamer};

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::schema::{canonical_type, ColumnSpec, RelationshipSpec, TableSpec};

// "<identifier> table" in the user's prompt, e.g. "create an orders table".
static LABEL_IN_PROMPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([A-Za-z_][A-Za-z0-9_]*)\s+table").unwrap());

// "Table <name>:" lines in the rendered existing-schema context.
static SCHEMA_TABLE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*table\s+([A-Za-z0-9_]+)\s*:").unwrap());

const DEFAULT_LABEL: &str = "generated_table";
const DEFAULT_TYPE: &str = "varchar(255)";
const DEFAULT_CONFIDENCE: &str = "medium";
const DEFAULT_REASON: &str = "suggested by the model";
const FK_REASON: &str = "foreign key column references an existing table";

/// Normalize a decoded value into a canonical table-schema record.
///
/// `original_prompt` is consulted for label inference and the timestamp
/// opt-out phrases; `existing_schema_text` supplies the known table
/// names used for foreign-key reference inference.
pub fn normalize(value: &Value, original_prompt: &str, existing_schema_text: &str) -> TableSpec {
    let empty = Map::new();
    let obj: &Map<String, Value> = match value {
        Value::Array(items) => items.first().and_then(Value::as_object).unwrap_or(&empty),
        Value::Object(map) => map,
        _ => &empty,
    };

    let label = resolve_label(obj, original_prompt);

    let mut name_namer = UniqueNamer::new();
    let mut id_namer = UniqueNamer::new();
    let mut columns = normalize_columns(obj, &mut name_namer, &mut id_namer);

    infer_foreign_key_references(&mut columns, existing_schema_text);
    ensure_primary_key(&mut columns, &mut name_namer, &mut id_namer);
    inject_timestamps(&mut columns, original_prompt, &mut name_namer, &mut id_namer);

    let suggested_relationships = normalize_relationships(obj, &label, &columns);

    TableSpec {
        label,
        columns,
        suggested_relationships,
        error: obj.get("error").and_then(Value::as_str).map(str::to_string),
    }
}

/// Sanitized supplied label, else a label inferred from the prompt,
/// else the fixed default.
fn resolve_label(obj: &Map<String, Value>, original_prompt: &str) -> String {
    obj.get("label")
        .and_then(Value::as_str)
        .map(sanitize_identifier)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            LABEL_IN_PROMPT
                .captures(original_prompt)
                .map(|caps| sanitize_identifier(&caps[1]))
                .filter(|s| !s.is_empty())
        })
        .unwrap_or_else(|| DEFAULT_LABEL.to_string())
}

fn normalize_columns(
    obj: &Map<String, Value>,
    name_namer: &mut UniqueNamer,
    id_namer: &mut UniqueNamer,
) -> Vec<ColumnSpec> {
    let supplied = match obj.get("columns").and_then(Value::as_array) {
        Some(items) => items,
        None => return Vec::new(),
    };

    let mut columns = Vec::with_capacity(supplied.len());
    let mut primary_key_seen = false;

    for (idx, entry) in supplied.iter().enumerate() {
        let col = match entry.as_object() {
            Some(map) => map,
            None => continue,
        };
        let position = idx + 1;

        // Name comes from `name`, then `id`, then a positional fallback;
        // an all-punctuation name that sanitizes to nothing falls back too.
        let mut name = non_empty_str(col, "name")
            .or_else(|| non_empty_str(col, "id"))
            .map(sanitize_identifier)
            .unwrap_or_default();
        if name.is_empty() {
            name = format!("column_{position}");
        }
        let name = name_namer.claim(&name);

        let id_base = non_empty_str(col, "id")
            .map(sanitize_identifier)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| name.clone());
        let id = id_namer.claim(&id_base);

        // Exactly one primary key survives; later claims are demoted.
        let mut is_primary_key = col
            .get("isPrimaryKey")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if is_primary_key && primary_key_seen {
            is_primary_key = false;
        }
        primary_key_seen |= is_primary_key;

        let is_foreign_key = col
            .get("isForeignKey")
            .and_then(Value::as_bool)
            .unwrap_or_else(|| name.ends_with("_id") && name != "id");

        let mut is_nullable = col
            .get("isNullable")
            .and_then(Value::as_bool)
            .unwrap_or(!(is_primary_key || is_foreign_key));
        if is_primary_key {
            is_nullable = false;
        }

        let column_type = col
            .get("type")
            .and_then(Value::as_str)
            .map(canonical_type)
            .unwrap_or_else(|| DEFAULT_TYPE.to_string());

        columns.push(ColumnSpec {
            id,
            name,
            column_type,
            is_primary_key,
            is_foreign_key,
            is_nullable,
            referenced_table: non_empty_str(col, "referencedTable")
                .map(sanitize_identifier)
                .filter(|s| !s.is_empty()),
            referenced_column: non_empty_str(col, "referencedColumn")
                .map(sanitize_identifier)
                .filter(|s| !s.is_empty()),
        });
    }

    columns
}

/// Resolve missing foreign-key references against table names found in
/// the existing schema text, probing the stripped `_id` base and its
/// plural forms.
fn infer_foreign_key_references(columns: &mut [ColumnSpec], existing_schema_text: &str) {
    let known_tables: Vec<String> = SCHEMA_TABLE_LINE
        .captures_iter(existing_schema_text)
        .map(|caps| sanitize_identifier(&caps[1]))
        .collect();

    for col in columns.iter_mut() {
        if !col.is_foreign_key {
            continue;
        }
        if col.referenced_table.is_none() {
            if let Some(base) = col.name.strip_suffix("_id") {
                let probes = [base.to_string(), format!("{base}s"), format!("{base}es")];
                col.referenced_table = probes
                    .into_iter()
                    .find(|probe| known_tables.iter().any(|table| table == probe));
            }
        }
        if col.referenced_table.is_some() && col.referenced_column.is_none() {
            col.referenced_column = Some("id".to_string());
        }
    }
}

/// Insert a uuid primary key at the front when none was supplied.
fn ensure_primary_key(
    columns: &mut Vec<ColumnSpec>,
    name_namer: &mut UniqueNamer,
    id_namer: &mut UniqueNamer,
) {
    if columns.iter().any(|c| c.is_primary_key) {
        return;
    }

    let mut candidate = "id".to_string();
    if name_namer.contains(&candidate) || id_namer.contains(&candidate) {
        candidate = "id_pk".to_string();
        let mut n = 2;
        while name_namer.contains(&candidate) || id_namer.contains(&candidate) {
            candidate = format!("id_pk_{n}");
            n += 1;
        }
    }
    name_namer.claim(&candidate);
    id_namer.claim(&candidate);

    columns.insert(0, ColumnSpec::primary_key(candidate.clone(), candidate));
}

/// Append `created_at` / `updated_at` unless the prompt opts out.
fn inject_timestamps(
    columns: &mut Vec<ColumnSpec>,
    original_prompt: &str,
    name_namer: &mut UniqueNamer,
    id_namer: &mut UniqueNamer,
) {
    let prompt = original_prompt.to_lowercase();
    if prompt.contains("no timestamp") || prompt.contains("without timestamp") {
        return;
    }

    for stamp in ["created_at", "updated_at"] {
        if columns.iter().any(|c| c.name == stamp) {
            continue;
        }
        let name = name_namer.claim(stamp);
        let id = id_namer.claim(stamp);
        columns.push(ColumnSpec::timestamp(id, name));
    }
}

/// Sanitize and de-duplicate supplied relationships; when none are
/// usable, synthesize one per resolved foreign-key column.
fn normalize_relationships(
    obj: &Map<String, Value>,
    label: &str,
    columns: &[ColumnSpec],
) -> Vec<RelationshipSpec> {
    let mut seen: IndexSet<(String, String, String, String, String)> = IndexSet::new();
    let mut relationships = Vec::new();

    if let Some(supplied) = obj.get("suggested_relationships").and_then(Value::as_array) {
        for entry in supplied {
            let rel = match entry.as_object() {
                Some(map) => map,
                None => continue,
            };
            let required = [
                non_empty_str(rel, "from_table"),
                non_empty_str(rel, "from_column"),
                non_empty_str(rel, "to_table"),
                non_empty_str(rel, "to_column"),
                non_empty_str(rel, "relationship_type"),
            ];
            let [Some(from_table), Some(from_column), Some(to_table), Some(to_column), Some(kind)] =
                required
            else {
                continue;
            };

            let spec = RelationshipSpec {
                from_table: sanitize_identifier(from_table),
                from_column: sanitize_identifier(from_column),
                to_table: sanitize_identifier(to_table),
                to_column: sanitize_identifier(to_column),
                relationship_type: kind.to_lowercase(),
                confidence: non_empty_str(rel, "confidence")
                    .map(str::to_lowercase)
                    .unwrap_or_else(|| DEFAULT_CONFIDENCE.to_string()),
                reason: non_empty_str(rel, "reason")
                    .map(str::to_lowercase)
                    .unwrap_or_else(|| DEFAULT_REASON.to_string()),
            };
            if seen.insert(spec.key()) {
                relationships.push(spec);
            }
        }
    }

    if relationships.is_empty() {
        for col in columns {
            let to_table = match (col.is_foreign_key, &col.referenced_table) {
                (true, Some(table)) => table.clone(),
                _ => continue,
            };
            let spec = RelationshipSpec {
                from_table: label.to_string(),
                from_column: col.name.clone(),
                to_table,
                to_column: col
                    .referenced_column
                    .clone()
                    .unwrap_or_else(|| "id".to_string()),
                relationship_type: "one_to_many".to_string(),
                confidence: DEFAULT_CONFIDENCE.to_string(),
                reason: FK_REASON.to_string(),
            };
            if seen.insert(spec.key()) {
                relationships.push(spec);
            }
        }
    }

    relationships
}

fn non_empty_str<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}
