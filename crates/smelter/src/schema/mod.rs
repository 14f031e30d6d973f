//! Schema representation for normalized table specifications.

mod column;
mod table;
mod types;

pub use column::ColumnSpec;
pub use table::{RelationshipSpec, TableSpec};
pub use types::canonical_type;
