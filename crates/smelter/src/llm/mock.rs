//! Mock text generator for testing.

use crate::error::{Result, SmelterError};

use super::provider::{GenerateOptions, TextGenerator};

// The canned table the original service returned when no model was
// loaded.
const DEFAULT_RESPONSE: &str = r#"{
  "label": "example_table",
  "columns": [
    {"id": "id", "name": "id", "type": "uuid", "isPrimaryKey": true, "isForeignKey": false, "isNullable": false},
    {"id": "name", "name": "name", "type": "varchar", "isPrimaryKey": false, "isForeignKey": false, "isNullable": false}
  ]
}"#;

/// Mock generator that returns a fixed response, for tests and offline
/// use.
pub struct MockGenerator {
    response: String,
    fail_with: Option<String>,
}

impl MockGenerator {
    /// Create a mock that returns the canned example table.
    pub fn new() -> Self {
        Self {
            response: DEFAULT_RESPONSE.to_string(),
            fail_with: None,
        }
    }

    /// Create a mock that returns `response` verbatim.
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            fail_with: None,
        }
    }

    /// Create a mock whose `generate` always fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: String::new(),
            fail_with: Some(message.into()),
        }
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TextGenerator for MockGenerator {
    fn generate(&self, _prompt: &str, _options: &GenerateOptions) -> Result<String> {
        match &self.fail_with {
            Some(message) => Err(SmelterError::Generation(message.clone())),
            None => Ok(self.response.clone()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
