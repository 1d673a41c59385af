//! Shared utilities.
//!
//! - [`tokenizer`] - whitespace splitting and the letters-only word filter

pub mod tokenizer;

pub use tokenizer::*;
