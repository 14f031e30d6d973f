//! Identifier sanitization and collision-free naming.

use std::collections::HashMap;

/// Sanitize a raw identifier: lower-case, map every character outside
/// `[a-z0-9_]` to `_`, collapse runs of `_`, and trim leading/trailing
/// `_`. May return an empty string (callers substitute a positional
/// fallback).
pub fn sanitize_identifier(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_underscore = false;

    for ch in raw.trim().chars() {
        let mapped = if ch.is_ascii_alphanumeric() {
            ch.to_ascii_lowercase()
        } else {
            '_'
        };
        if mapped == '_' {
            if prev_underscore {
                continue;
            }
            prev_underscore = true;
        } else {
            prev_underscore = false;
        }
        out.push(mapped);
    }

    out.trim_matches('_').to_string()
}

/// Collision-free name allocation scoped to one normalization pass.
///
/// An explicit local counting map, per request; collisions get a
/// `_<count>` suffix (`user_name`, `user_name_2`, ...).
#[derive(Debug, Default)]
pub struct UniqueNamer {
    counts: HashMap<String, usize>,
}

impl UniqueNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a name has already been handed out.
    pub fn contains(&self, name: &str) -> bool {
        self.counts.contains_key(name)
    }

    /// Claim `base`, or a `_<count>`-suffixed variant of it on collision.
    pub fn claim(&mut self, base: &str) -> String {
        let count = {
            let entry = self.counts.entry(base.to_string()).or_insert(0);
            *entry += 1;
            *entry
        };
        if count == 1 {
            base.to_string()
        } else {
            // The suffixed name may itself have been supplied explicitly.
            let suffixed = format!("{base}_{count}");
            self.claim(&suffixed)
        }
    }
}
