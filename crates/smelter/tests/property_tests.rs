//! Property-based tests for the extraction and normalization pipeline.
//!
//! These tests use proptest to generate random inputs and verify that
//! the pipeline maintains its invariants under all conditions:
//!
//! 1. **No panics**: every stage accepts arbitrary text
//! 2. **Totality**: `decode_and_normalize` always yields a valid spec
//! 3. **Determinism**: same input always produces same output
//! 4. **Invariants**: primary-key and uniqueness guarantees always hold

use proptest::prelude::*;

use smelter::{decode_and_normalize, extract, normalize};

/// Arbitrary printable text, including brackets, quotes, and backslashes.
fn noisy_text() -> impl Strategy<Value = String> {
    "[ -~\\n]{0,200}"
}

/// Strings that look like model output wrapping a JSON object.
fn wrapped_object() -> impl Strategy<Value = String> {
    (
        "[a-zA-Z .,!]{0,40}",
        "[a-z_]{1,12}",
        "[a-z_]{1,12}",
        "[a-zA-Z .,!]{0,40}",
    )
        .prop_map(|(before, label, col, after)| {
            format!(
                r#"{before}{{"label": "{label}", "columns": [{{"name": "{col}"}}]}}{after}"#
            )
        })
}

proptest! {
    #[test]
    fn scan_never_panics_and_result_is_balanced(text in noisy_text()) {
        if let Some(candidate) = extract::scan(&text) {
            // A candidate is a substring delimited by an opener/closer pair.
            prop_assert!(
                candidate.starts_with('{') || candidate.starts_with('['),
                "candidate must start with an opener: {:?}",
                candidate
            );
            prop_assert!(
                candidate.ends_with('}') || candidate.ends_with(']'),
                "candidate must end with a closer: {:?}",
                candidate
            );
        }
    }

    #[test]
    fn scan_recovers_embedded_json_byte_for_byte(
        prefix in "[a-zA-Z .,:]{0,40}",
        key in "[a-z_]{1,10}",
        num in 0i64..10_000,
        suffix in "[a-zA-Z .,:]{0,40}",
    ) {
        let embedded = format!(r#"{{"{key}": {num}}}"#);
        let text = format!("{prefix}{embedded}{suffix}");
        prop_assert_eq!(extract::scan(&text), Some(embedded.as_str()));
    }

    #[test]
    fn scan_ignores_delimiters_inside_strings(
        inner in "[a-z{}\\[\\] ]{0,30}",
    ) {
        let text = format!(r#"{{"note": "{inner}"}}"#);
        prop_assert_eq!(extract::scan(&text), Some(text.as_str()));
    }

    #[test]
    fn clean_and_repair_never_panic(text in noisy_text()) {
        let cleaned = extract::clean(&text);
        let _ = extract::prevalidate(&cleaned);
        let _ = extract::repair(&text);
    }

    #[test]
    fn decode_is_total_up_to_no_json_found(text in noisy_text()) {
        // Either a decoded value or the one signaled error; never a panic.
        let _ = extract::decode(&text);
    }

    #[test]
    fn decode_and_normalize_is_total_and_deterministic(
        raw in noisy_text(),
        prompt in "[a-zA-Z ]{0,40}",
    ) {
        let first = decode_and_normalize(&raw, &prompt, "");
        let second = decode_and_normalize(&raw, &prompt, "");
        prop_assert_eq!(&first, &second);
        prop_assert!(!first.label.is_empty());
    }

    #[test]
    fn normalize_always_yields_exactly_one_primary_key(raw in wrapped_object()) {
        let spec = decode_and_normalize(&raw, "", "");
        let pk_count = spec.columns.iter().filter(|c| c.is_primary_key).count();
        prop_assert_eq!(pk_count, 1);
        prop_assert!(!spec.primary_key().unwrap().is_nullable);
    }

    #[test]
    fn normalize_identifiers_are_unique(raw in wrapped_object()) {
        let spec = decode_and_normalize(&raw, "", "");

        let mut names: Vec<&str> = spec.columns.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        prop_assert_eq!(names.len(), spec.columns.len());

        let mut ids: Vec<&str> = spec.columns.iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), spec.columns.len());
    }

    #[test]
    fn normalize_injects_timestamps_absent_opt_out(raw in wrapped_object()) {
        let spec = decode_and_normalize(&raw, "an ordinary prompt", "");
        prop_assert!(spec.get_column("created_at").is_some());
        prop_assert!(spec.get_column("updated_at").is_some());
    }

    #[test]
    fn normalize_is_idempotent(raw in wrapped_object()) {
        let first = decode_and_normalize(&raw, "", "");
        let value = serde_json::to_value(&first).unwrap();
        let second = normalize(&value, "", "");
        prop_assert_eq!(first, second);
    }
}
