//! Decode orchestration: clean, scan, parse, repair, fall back.

use serde_json::{json, Value};

use crate::error::{Result, SmelterError};

use super::{cleaner, repair, scanner};

/// Decode one JSON value out of raw generation output.
///
/// Sequence: clean → pre-repair validation → scan (failure is the one
/// signaled error, [`SmelterError::NoJsonFound`]) → array-head unwrap
/// when it applies → strict parse → repair and one retry → last-resort
/// value. Every failure past the scan degrades into the last-resort
/// value rather than propagating, so callers always receive something
/// renderable.
pub fn decode(raw: &str) -> Result<Value> {
    let cleaned = cleaner::clean(raw);
    let validated = repair::prevalidate(&cleaned);

    let candidate = scanner::scan(&validated).ok_or(SmelterError::NoJsonFound)?;
    // Prefer the first object of an array-shaped candidate.
    let candidate = scanner::unwrap_first_object(candidate).unwrap_or(candidate);

    if let Ok(value) = serde_json::from_str(candidate) {
        return Ok(value);
    }

    let repaired = repair::repair(candidate);
    match serde_json::from_str(&repaired) {
        Ok(value) => Ok(value),
        Err(err) => Ok(last_resort_value(&format!("parse failed: {err}"))),
    }
}

/// The fixed minimal value returned when all decode attempts fail.
pub(crate) fn last_resort_value(error: &str) -> Value {
    json!({
        "label": "error_table",
        "columns": [],
        "suggested_relationships": [],
        "error": error,
    })
}
