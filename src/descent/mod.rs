//! Generic backtracking recursive-descent toolkit.
//!
//! A language plugs in by implementing [`Grammar`] (and usually [`Lexer`]).
//! Each production is a function that calls [`Builder::derive`] with its
//! [`NonTerminal`] and returns whether it matched. The builder records a
//! checkpoint on entry and either commits the production's subtree or rolls
//! the cursor and partial tree back on exit, so ordered choice between
//! alternatives is simply "try each in turn".
//!
//! ```
//! use formulang::descent::{compile, tokens, Builder, Grammar, NonTerminal, Terminal, Trace};
//!
//! const LIST: NonTerminal = NonTerminal::new("List");
//! const X: Terminal = Terminal::from_static("x");
//!
//! struct Xs;
//!
//! fn list(trace: &Trace, b: &mut Builder) -> bool {
//!     b.derive(trace, LIST, |trace, b| !b.match_token(&X) || list(trace, b))
//! }
//!
//! impl Grammar for Xs {
//!     fn build_parse_tree(&self, trace: &Trace, b: &mut Builder) -> bool {
//!         list(trace, b)
//!     }
//! }
//!
//! let tree = compile(tokens(["x", "x"]), &Xs).unwrap();
//! assert_eq!(tree.to_string(), "x x");
//! ```

pub mod builder;
pub mod grammar;
pub mod symbol;
pub mod token;
pub mod trace;
pub mod tree;

pub use builder::{Builder, Entered, Outcome};
pub use grammar::{Grammar, Lexer, compile};
pub use symbol::{NonTerminal, Symbol, Terminal};
pub use token::{Token, tokens};
pub use trace::Trace;
pub use tree::{Lexemes, ParseTree};
