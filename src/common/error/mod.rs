//! Unified error types for formulang.
//!
//! This module provides one error type shared by the lexer, the grammar,
//! and the evaluator, presenting a consistent API to users.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, ErrorKind, EvaluationError, Result};
