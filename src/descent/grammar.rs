//! Seams between the builder and a concrete language.

use super::builder::Builder;
use super::token::Token;
use super::trace::Trace;
use super::tree::ParseTree;
use crate::common::{Error, Result};
use log::debug;

/// Splits source text into tokens.
pub trait Lexer {
    fn lex(&self, input: &str) -> Result<Vec<Token>>;
}

/// A set of productions with a designated entry point.
pub trait Grammar {
    /// Run the entry production against `builder`, reporting whether it
    /// matched.
    fn build_parse_tree(&self, trace: &Trace, builder: &mut Builder) -> bool;
}

/// Derive a parse tree for `tokens` with `grammar`.
///
/// The entry production must match and consume every token; otherwise the
/// result is a syntax error pointing at the last token that was matched.
pub fn compile<G>(tokens: Vec<Token>, grammar: &G) -> Result<ParseTree>
where
    G: Grammar + ?Sized,
{
    let token_count = tokens.len();
    let mut builder = Builder::new(tokens);
    let matched = grammar.build_parse_tree(&Trace::new(), &mut builder);

    if !matched || !builder.is_exhausted() {
        debug!(
            "compile failed after {} of {} tokens (matched = {})",
            builder.cursor(),
            token_count,
            matched
        );
        return Err(syntax_error(&builder));
    }

    let tree = builder
        .finalize()
        .ok_or_else(|| Error::internal("entry production matched without producing a tree"))?;
    debug!("compiled {} tokens, tree depth {}", token_count, tree.depth());
    Ok(tree)
}

fn syntax_error(builder: &Builder) -> Error {
    match builder.last() {
        Some(token) => Error::Syntax {
            near: token.terminal().to_string(),
            offset: Some(token.offset()),
        },
        None => Error::Syntax {
            near: String::new(),
            offset: None,
        },
    }
}
