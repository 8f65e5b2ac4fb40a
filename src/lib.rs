//! Formulang - a compiler and evaluator for a small formula language
//!
//! Formulas are arithmetic expressions over numbers, bracketed variables and
//! function calls, with `?:` conditionals. Text is compiled by a
//! backtracking recursive-descent parser into a concrete parse tree, and the
//! tree is evaluated by a walker that mirrors the grammar.
//!
//! # Features
//!
//! - **Backtracking descent toolkit**: grammar-agnostic builder with checkpoint and rollback
//! - **Formula grammar**: arithmetic, `mod`, comparisons, `and`/`or`/`not`, `?:` conditionals
//! - **Function libraries**: built-ins plus caller-registered functions with fallback
//! - **Epsilon comparisons**: configurable tolerance for `==`, `!=`, `<=`, `>=`
//! - **Diagnostics**: evaluation errors carry the chain of productions that led to them
//! - **Test-case runner**: verify formulas in bulk from comma-separated files
//!
//! # Example - One-shot evaluation
//!
//! ```
//! assert_eq!(formulang::eval("(1 + 2) * 3").unwrap(), 9.0);
//! assert_eq!(formulang::eval("1 - 2 - 3").unwrap(), 2.0); // right-grouped: 1 - (2 - 3)
//! ```
//!
//! # Example - Compile once, evaluate many times
//!
//! ```
//! use formulang::{EngineConfig, FormulaEngine, Variables};
//!
//! # fn main() -> formulang::Result<()> {
//! let engine = FormulaEngine::new(EngineConfig::default().with_epsilon(1e-9));
//! let tree = engine.compile("([score] >= 50 ? 1 : 0)")?;
//!
//! for (score, expected) in [(75.0, 1.0), (20.0, 0.0)] {
//!     let vars = Variables::from([("score", score)]);
//!     assert_eq!(engine.evaluate(&tree, &vars)?, expected);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Custom functions
//!
//! ```
//! use std::sync::Arc;
//! use formulang::descent::Trace;
//! use formulang::formula::validate;
//! use formulang::{FormulaEngine, FunctionLibrary, Variables};
//!
//! let mut lib = FunctionLibrary::new();
//! lib.register("hypot", |trace: &Trace, args: &[f64]| {
//!     validate(trace, "hypot", args).arg_length(2)?;
//!     Ok(args[0].hypot(args[1]))
//! });
//!
//! let engine = FormulaEngine::default().with_library(Arc::new(lib));
//! assert_eq!(engine.eval("hypot(3, 4) + max(1, 2)", &Variables::new()).unwrap(), 7.0);
//! ```

/// Common types shared by every stage
///
/// Error types and number formatting.
pub mod common;

/// Grammar-agnostic backtracking recursive-descent toolkit
///
/// Symbols, tokens, the parse-tree builder, traces and the parse tree itself.
pub mod descent;

/// The formula language
///
/// Lexer, grammar, evaluator, function libraries and the engine front door.
pub mod formula;

pub use common::{Error, ErrorKind, EvaluationError, Result, fmt_num};
pub use descent::{ParseTree, Trace};
pub use formula::{
    EngineConfig, FormulaEngine, Function, FunctionLibrary, Library, StdLibrary, Variables,
};

/// Compile and evaluate `input` with the standard library and no variables.
pub fn eval(input: &str) -> Result<f64> {
    FormulaEngine::default().eval(input, &Variables::new())
}
