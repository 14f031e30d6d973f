//! Text generation boundary.
//!
//! This crate never calls a model itself; it consumes a
//! [`TextGenerator`] supplied by the host application and treats its
//! failures as opaque. Only the trait and a deterministic mock live
//! here.

mod mock;
mod provider;

pub use mock::MockGenerator;
pub use provider::{GenerateOptions, TextGenerator};
