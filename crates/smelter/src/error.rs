//! Error types for the Smelter library.

use thiserror::Error;

/// Main error type for Smelter operations.
#[derive(Debug, Error)]
pub enum SmelterError {
    /// The scanner located no bracket-delimited region at all.
    ///
    /// This is the only decode failure surfaced as an error; everything
    /// downstream of having a candidate degrades into the last-resort
    /// structure instead.
    #[error("no JSON value found in model output")]
    NoJsonFound,

    /// A text generator failed. The message is opaque to this crate.
    #[error("generation failed: {0}")]
    Generation(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Smelter operations.
pub type Result<T> = std::result::Result<T, SmelterError>;
