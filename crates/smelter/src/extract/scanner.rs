//! Balanced-value scanning over noisy text.
//!
//! The scanner locates the shortest prefix, starting at the first `{` or
//! `[`, that forms a bracket-balanced region, tracking string and escape
//! state so delimiters inside quoted content never terminate the scan.
//! It runs in a single left-to-right pass: O(n) time, O(depth) space.

/// Find the first bracket-balanced JSON candidate in `text`.
///
/// Returns the candidate substring, from the first `{` or `[` through
/// its matching closer inclusive. Returns `None` when no opener exists,
/// when nesting is mismatched (e.g. `{"a": [1}`), or when the input ends
/// before the region balances — callers fall through to repair in those
/// cases.
pub fn scan(text: &str) -> Option<&str> {
    let start = match (text.find('{'), text.find('[')) {
        (None, None) => return None,
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (Some(a), Some(b)) => a.min(b),
    };

    let mut stack: Vec<u8> = Vec::new();
    let mut in_string = false;
    let mut escape = false;

    for (i, &ch) in text.as_bytes().iter().enumerate().skip(start) {
        if in_string {
            if escape {
                escape = false;
            } else if ch == b'\\' {
                escape = true;
            } else if ch == b'"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            b'"' => in_string = true,
            b'{' | b'[' => stack.push(ch),
            b'}' => {
                if stack.pop() != Some(b'{') {
                    return None;
                }
            }
            b']' => {
                if stack.pop() != Some(b'[') {
                    return None;
                }
            }
            _ => {}
        }

        if stack.is_empty() && !in_string {
            // The closer at `i` is ASCII, so i + 1 is a char boundary.
            return Some(&text[start..=i]);
        }
    }

    // Stack never emptied: truncated input.
    None
}

/// Extract the first object element from an array-shaped candidate.
///
/// The model sometimes wraps a single intended object in an array;
/// callers prefer the object. Applies only when the candidate's first
/// non-whitespace character is `[`; succeeds only when the inner
/// candidate starts with `{`.
pub fn unwrap_first_object(candidate: &str) -> Option<&str> {
    let trimmed = candidate.trim_start();
    let rest = trimmed.strip_prefix('[')?;
    let inner = scan(rest)?;
    if inner.starts_with('{') {
        Some(inner)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_embedded_in_prose() {
        let text = r#"Sure! Here is the table you asked for: {"label": "users"} hope it helps"#;
        assert_eq!(scan(text), Some(r#"{"label": "users"}"#));
    }

    #[test]
    fn test_array_before_object() {
        let text = r#"noise [1, 2] and {"a": 1}"#;
        assert_eq!(scan(text), Some("[1, 2]"));
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let text = r#"{"note": "a } and { inside", "n": 1}"#;
        assert_eq!(scan(text), Some(text));
    }

    #[test]
    fn test_escaped_quotes_inside_strings() {
        let text = r#"{"quote": "he said \"}\" loudly"}"#;
        assert_eq!(scan(text), Some(text));
    }

    #[test]
    fn test_trailing_backslash_escape_state() {
        let text = r#"{"path": "C:\\dir\\"}"#;
        assert_eq!(scan(text), Some(text));
    }

    #[test]
    fn test_no_brackets_at_all() {
        assert_eq!(scan("no brackets at all"), None);
        assert_eq!(scan(""), None);
    }

    #[test]
    fn test_truncated_input() {
        assert_eq!(scan(r#"{"a": [1, 2"#), None);
    }

    #[test]
    fn test_mismatched_nesting() {
        assert_eq!(scan(r#"{"a": [1}"#), None);
        assert_eq!(scan(r#"[1, 2}"#), None);
    }

    #[test]
    fn test_shortest_balanced_prefix_wins() {
        // Trailing garbage after the first value is never included.
        assert_eq!(scan(r#"{"a":1}{"b":2}"#), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_nested_structures() {
        let text = r#"{"a": {"b": [1, {"c": 2}]}}"#;
        assert_eq!(scan(text), Some(text));
    }

    #[test]
    fn test_unwrap_array_head_object() {
        assert_eq!(
            unwrap_first_object(r#"[{"label": "tags"}, {"label": "posts"}]"#),
            Some(r#"{"label": "tags"}"#)
        );
        assert_eq!(unwrap_first_object(r#"  [ {"a": 1} ]"#), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn test_unwrap_rejects_non_object_heads() {
        assert_eq!(unwrap_first_object("[1, 2, 3]"), None);
        assert_eq!(unwrap_first_object(r#"[["a"], {"b": 1}]"#), None);
        assert_eq!(unwrap_first_object(r#"{"a": 1}"#), None);
    }
}
