//! Resilient JSON extraction from raw generation output.
//!
//! Pipeline: [`cleaner::clean`] strips presentation noise,
//! [`repair::prevalidate`] fixes non-delimiter corruption,
//! [`scanner::scan`] bounds one bracket-balanced candidate,
//! [`decoder::decode`] drives strict parsing with a single repair retry
//! and a guaranteed last-resort value.

pub mod cleaner;
pub mod decoder;
pub mod repair;
pub mod scanner;

pub use cleaner::clean;
pub use decoder::decode;
pub use repair::{prevalidate, repair};
pub use scanner::{scan, unwrap_first_object};
