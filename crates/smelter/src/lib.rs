//! Smelter: resilient JSON extraction, repair, and table-schema
//! normalization for LLM output.
//!
//! A model instructed to "return only JSON" cannot be trusted to do so.
//! Smelter locates the first syntactically-plausible JSON value inside
//! the noise, heuristically repairs common corruption patterns, and
//! normalizes the decoded value into a canonical database-table record.
//!
//! # Core Principles
//!
//! - **Total**: the pipeline always yields a structurally valid
//!   [`TableSpec`]; parse failures become data, not errors
//! - **Deterministic**: same input, same output — no hidden state
//! - **Pure**: synchronous transformations over immutable inputs, safe
//!   to run concurrently without coordination
//!
//! # Example
//!
//! ```
//! use smelter::Smelter;
//!
//! let smelter = Smelter::new();
//! let spec = smelter.decode_and_normalize(
//!     r#"Here is your table: {"label": "Order", "columns": [{"name": "user_id"}]}"#,
//!     "create orders table",
//!     "Table users:\n  id uuid",
//! );
//!
//! assert_eq!(spec.label, "order");
//! assert!(spec.primary_key().is_some());
//! ```

pub mod error;
pub mod extract;
pub mod llm;
pub mod normalize;
pub mod schema;

mod smelter;

pub use crate::smelter::{decode_and_normalize, Smelter, SmelterConfig};
pub use error::{Result, SmelterError};
pub use llm::{GenerateOptions, MockGenerator, TextGenerator};
pub use normalize::normalize;
pub use schema::{ColumnSpec, RelationshipSpec, TableSpec};
