//! Presentation-noise stripping for raw generation output.
//!
//! Models asked to "return only JSON" still wrap their answer in fenced
//! code blocks, double-encode it as a JSON string, or interleave it with
//! chat-template echoes. The cleaner removes that noise before scanning.
//! Rewrites are ordered and idempotent; in particular, string-unwrapping
//! must precede fence-stripping because a double-encoded response hides
//! its fences inside the outer string.

use once_cell::sync::Lazy;
use regex::Regex;

// Diagnostic and chat-template lines the generation backend is known to
// echo into its output.
const NOISE_PREFIXES: &[&str] = &["Number of tokens", "Token count:", "[INST]", "</s>", "<s>"];

// Two observed line-join corruptions: a closer glued to the next opener
// across a newline, with the separating comma lost.
static BRACE_JOIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\}(\r?\n[ \t]*)\{").unwrap());
static BRACKET_JOIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\](\r?\n[ \t]*)\[").unwrap());

/// Strip presentation noise from raw generation output.
pub fn clean(raw: &str) -> String {
    let mut text = raw.to_string();

    // 1. Double-encoded output: the whole response is one JSON string.
    let trimmed = text.trim();
    if trimmed.len() >= 2
        && trimmed.starts_with('"')
        && trimmed.ends_with('"')
        && trimmed.contains("\\\"")
    {
        if let Ok(decoded) = serde_json::from_str::<String>(trimmed) {
            text = decoded;
        }
    }

    // 2. Fenced code blocks: keep only the interior.
    if let Some(interior) = fenced_interior(&text) {
        text = interior.trim().to_string();
    }

    // 3. Lost-comma line joins.
    text = BRACE_JOIN.replace_all(&text, "},${1}{").into_owned();
    text = BRACKET_JOIN.replace_all(&text, "],${1}[").into_owned();

    // 4. Noise lines.
    if text
        .lines()
        .any(|line| is_noise_line(line))
    {
        text = text
            .lines()
            .filter(|line| !is_noise_line(line))
            .collect::<Vec<_>>()
            .join("\n");
    }

    text
}

fn is_noise_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    NOISE_PREFIXES.iter().any(|p| trimmed.starts_with(p))
}

/// Interior of the first fenced code block, preferring a `json`-labeled
/// fence over an unlabeled one.
fn fenced_interior(text: &str) -> Option<&str> {
    if let Some(i) = text.find("```json") {
        let rest = &text[i + "```json".len()..];
        if let Some(j) = rest.find("```") {
            return Some(&rest[..j]);
        }
    }
    let i = text.find("```")?;
    let rest = &text[i + 3..];
    let j = rest.find("```")?;
    Some(&rest[..j])
}
