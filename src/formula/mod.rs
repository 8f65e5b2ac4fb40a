//! The formula language: a small arithmetic and logic language with
//! variables, function calls and conditional expressions.
//!
//! Text is lexed by [`FormulaLexer`], compiled into a [`ParseTree`] by
//! [`FormulaGrammar`] on top of the [`descent`](crate::descent) toolkit, and
//! evaluated by [`Evaluator`] against a [`Library`] of functions and a set of
//! [`Variables`]. [`FormulaEngine`] wires the stages together.
//!
//! ```text
//! 1 + 2 * 3                  arithmetic, `mod` truncates both operands
//! [rate] * 100               variables in square brackets
//! max(1, [x], pow(2, 3))     function calls
//! ([x] > 0 ? [x] : -[x])     conditionals, parenthesised
//! ```
//!
//! [`ParseTree`]: crate::descent::ParseTree

pub mod engine;
pub mod evaluator;
pub mod grammar;
pub mod lexer;
pub mod library;
pub mod logic;
pub mod pattern;
pub mod stdlib;
pub mod symbol;
pub mod testcase;
pub mod token;
pub mod variables;

pub use engine::{EngineConfig, FormulaEngine};
pub use evaluator::Evaluator;
pub use grammar::{Entry, FormulaGrammar};
pub use lexer::FormulaLexer;
pub use library::{Function, FunctionLibrary, Library, Validator, validate};
pub use logic::LogicOp;
pub use stdlib::StdLibrary;
pub use testcase::{TestCase, TestOutcome, TestReport, load_test_cases, parse_test_cases, run_test_cases};
pub use variables::Variables;

#[cfg(test)]
mod tests;
