//! Main Smelter struct and public API.

use std::sync::Arc;

use crate::extract;
use crate::llm::{GenerateOptions, TextGenerator};
use crate::normalize;
use crate::schema::TableSpec;

/// Configuration for the decode-and-normalize pipeline.
#[derive(Debug, Clone)]
pub struct SmelterConfig {
    /// Options forwarded to the configured generator.
    pub generate: GenerateOptions,
}

impl Default for SmelterConfig {
    fn default() -> Self {
        Self {
            generate: GenerateOptions::default(),
        }
    }
}

/// The decode-and-normalize engine.
///
/// Stateless apart from configuration; one instance can serve
/// concurrent requests without coordination.
pub struct Smelter {
    config: SmelterConfig,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl Smelter {
    /// Create a Smelter with default configuration and no generator.
    pub fn new() -> Self {
        Self::with_config(SmelterConfig::default())
    }

    /// Create a Smelter with custom configuration.
    pub fn with_config(config: SmelterConfig) -> Self {
        Self {
            config,
            generator: None,
        }
    }

    /// Attach a text generator for [`Smelter::table_from_generation`].
    pub fn with_generator(mut self, generator: impl TextGenerator + 'static) -> Self {
        self.generator = Some(Arc::new(generator));
        self
    }

    /// Decode raw model output and normalize it into a table spec.
    ///
    /// Never fails: when no JSON value can be located at all, the
    /// returned spec is the last-resort structure and carries the
    /// diagnostic in its `error` field.
    pub fn decode_and_normalize(
        &self,
        raw_model_output: &str,
        original_prompt: &str,
        existing_schema_text: &str,
    ) -> TableSpec {
        decode_and_normalize(raw_model_output, original_prompt, existing_schema_text)
    }

    /// Run the configured generator with `prompt` verbatim and pipe its
    /// output through [`Smelter::decode_and_normalize`].
    ///
    /// A generator failure is opaque to this crate; it becomes the
    /// last-resort structure's `error` message rather than an error.
    pub fn table_from_generation(&self, prompt: &str, existing_schema_text: &str) -> TableSpec {
        let generator = match &self.generator {
            Some(generator) => generator,
            None => return TableSpec::last_resort("no text generator configured"),
        };

        match generator.generate(prompt, &self.config.generate) {
            Ok(raw) => self.decode_and_normalize(&raw, prompt, existing_schema_text),
            Err(err) => TableSpec::last_resort(err.to_string()),
        }
    }
}

impl Default for Smelter {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode raw model output and normalize it into a table spec.
///
/// Free-function form of [`Smelter::decode_and_normalize`].
pub fn decode_and_normalize(
    raw_model_output: &str,
    original_prompt: &str,
    existing_schema_text: &str,
) -> TableSpec {
    match extract::decode(raw_model_output) {
        Ok(value) => normalize::normalize(&value, original_prompt, existing_schema_text),
        Err(err) => TableSpec::last_resort(err.to_string()),
    }
}
