//! Common types and utilities shared by the compiler and the evaluator.

// Submodule declarations
pub mod error;
pub mod number;

// Re-exports for convenience
pub use error::{Error, ErrorKind, EvaluationError, Result};
pub use number::{fmt_num, write_num};
