//! Heuristic repair of near-JSON text.
//!
//! These rewrites are tuned to observed model failure modes, not
//! general-purpose JSON repair. The rewrite list and its order are the
//! contract: later rewrites assume earlier ones have normalized
//! spacing and structure.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// Adjacent closer/opener pairs with the separating comma lost.
static BRACE_PAIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\}(\s*)\{").unwrap());
static BRACKET_PAIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\](\s*)\[").unwrap());

// A value terminator followed by a quoted string with only whitespace
// between: the common "adjacent key-value pairs with no comma" failure.
static MISSING_COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(true|false|null|[0-9"\]}])(\s+)""#).unwrap());

// Trailing comma before a closer, invalid in strict JSON.
static TRAILING_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r",(\s*[\]}])").unwrap());

// An underscore-joined run of four or more tokens, candidate for the
// degenerate-generation collapse.
static TOKEN_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9]+(?:_[A-Za-z0-9]+){3,}").unwrap());

/// Apply the ordered delimiter repairs to a candidate that failed
/// strict parsing.
///
/// Pure, non-recursive, single pass of textual substitutions:
/// 1. insert the missing comma in `}{` / `][` pairs;
/// 2. insert the missing comma between a value terminator and a
///    following quoted string;
/// 3. drop trailing commas before `}` / `]`.
pub fn repair(text: &str) -> String {
    let step1 = BRACE_PAIR.replace_all(text, "},${1}{");
    let step1 = BRACKET_PAIR.replace_all(&step1, "],${1}[");
    let step2 = MISSING_COMMA.replace_all(&step1, "${1},${2}\"");
    TRAILING_COMMA.replace_all(&step2, "${1}").into_owned()
}

/// Pre-repair validation, run before scanning.
///
/// Handles corruption distinct from delimiter errors: degenerate
/// repeated tokens, unresolved prompt-template placeholders, and a
/// close-brace deficit from truncated output. Applied in that order.
pub fn prevalidate(text: &str) -> String {
    let mut text = collapse_repeated_tokens(text);

    text = text
        .replace("{table_name}", "\"unknown_table\"")
        .replace("{column_name}", "\"unknown_column\"");

    let opens = text.bytes().filter(|&b| b == b'{').count();
    let closes = text.bytes().filter(|&b| b == b'}').count();
    if opens > closes {
        text.extend(std::iter::repeat('}').take(opens - closes));
    }

    text
}

/// Collapse a token repeated 4+ times with underscore separators
/// (an artifact of degenerate generation) down to one occurrence.
fn collapse_repeated_tokens(text: &str) -> String {
    TOKEN_RUN
        .replace_all(text, |caps: &Captures| {
            let parts: Vec<&str> = caps[0].split('_').collect();
            let mut kept: Vec<&str> = Vec::with_capacity(parts.len());
            let mut i = 0;
            while i < parts.len() {
                let mut j = i + 1;
                while j < parts.len() && parts[j] == parts[i] {
                    j += 1;
                }
                if j - i >= 4 {
                    kept.push(parts[i]);
                } else {
                    kept.extend(&parts[i..j]);
                }
                i = j;
            }
            kept.join("_")
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_objects_get_comma() {
        assert_eq!(repair(r#"{"a":1}{"b":2}"#), r#"{"a":1},{"b":2}"#);
        assert_eq!(repair("[1] [2]"), "[1], [2]");
    }

    #[test]
    fn test_missing_comma_between_pairs() {
        assert_eq!(repair(r#"{"a": 1 "b": 2}"#), r#"{"a": 1, "b": 2}"#);
        assert_eq!(repair(r#"{"a": "x" "b": "y"}"#), r#"{"a": "x", "b": "y"}"#);
        assert_eq!(repair(r#"{"a": true "b": null}"#), r#"{"a": true, "b": null}"#);
        assert_eq!(repair(r#"{"a": [1] "b": 2}"#), r#"{"a": [1], "b": 2}"#);
    }

    #[test]
    fn test_valid_json_untouched() {
        let text = r#"{"a": 1, "b": [true, null], "c": "two words"}"#;
        assert_eq!(repair(text), text);
    }

    #[test]
    fn test_trailing_comma_removed() {
        assert_eq!(repair(r#"{"a": 1,}"#), r#"{"a": 1}"#);
        assert_eq!(repair("[1, 2, ]"), "[1, 2 ]");
    }

    #[test]
    fn test_repeated_token_collapse() {
        assert_eq!(
            prevalidate(r#"{"name": "user_user_user_user_user"}"#),
            r#"{"name": "user"}"#
        );
        // A prefix survives; only the degenerate run collapses.
        assert_eq!(
            prevalidate(r#"{"name": "col_name_name_name_name"}"#),
            r#"{"name": "col_name"}"#
        );
        // Three repeats are below the threshold.
        assert_eq!(
            prevalidate(r#"{"name": "a_a_a_b"}"#),
            r#"{"name": "a_a_a_b"}"#
        );
    }

    #[test]
    fn test_ordinary_identifiers_survive_prevalidate() {
        let text = r#"{"name": "created_at", "other": "a_b_c_d_e"}"#;
        assert_eq!(prevalidate(text), text);
    }

    #[test]
    fn test_placeholder_substitution() {
        assert_eq!(
            prevalidate(r#"{"label": {table_name}, "col": {column_name}}"#),
            r#"{"label": "unknown_table", "col": "unknown_column"}"#
        );
    }

    #[test]
    fn test_close_brace_deficit_appended() {
        assert_eq!(prevalidate(r#"{"a": {"b": 1}"#), r#"{"a": {"b": 1}}"#);
        assert_eq!(prevalidate(r#"{"a": 1"#), r#"{"a": 1}"#);
    }
}
