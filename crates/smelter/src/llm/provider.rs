//! Text generator trait and options.

use crate::error::Result;

/// Options forwarded to a text generator.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Sampling temperature (0.0-1.0).
    pub temperature: f64,
    /// Maximum tokens in the generated response.
    pub max_tokens: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}

/// Trait for text generation backends.
///
/// Implementations must be thread-safe (Send + Sync) so one generator
/// can serve concurrent decode pipelines. The prompt is passed through
/// verbatim; prompt construction belongs to the caller.
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`.
    ///
    /// Errors are treated as opaque by this crate: callers convert them
    /// into the last-resort structure's diagnostic message and never
    /// inspect them further.
    fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String>;

    /// Name of this generator (for diagnostics).
    fn name(&self) -> &str;
}
