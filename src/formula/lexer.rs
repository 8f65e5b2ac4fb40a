//! Tokenizer for formula text.

use super::{pattern, token};
use crate::common::{Error, Result};
use crate::descent::{Lexer, Terminal, Token};
use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

/// One alternation over every token class, matched case-sensitively and
/// tried left to right at each position: the word operators `mod`, `or`,
/// `and`, `not` (so `7mod3` splits before an identifier can swallow `mod3`),
/// variables, numbers, identifiers, then symbolic operators longest first so
/// `<=` wins over `<`. Upper-case words still lex as identifiers and are
/// lower-cased afterwards.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    let (words, symbols): (Vec<Terminal>, Vec<Terminal>) =
        token::dict().into_iter().partition(token::is_keyword);

    let mut operators: Vec<String> = symbols.iter().map(|t| regex::escape(t.as_str())).collect();
    operators.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    operators.dedup();

    let mut alternatives: Vec<String> = words.iter().map(|t| regex::escape(t.as_str())).collect();
    alternatives.extend(pattern::DICT.iter().map(|p| p.to_string()));
    alternatives.extend(operators);

    Regex::new(&alternatives.join("|")).expect("token alternation is a valid regex")
});

/// Lexer for the formula language.
///
/// Produces lower-cased terminals with the original text and byte offset
/// preserved on each [`Token`]. Whitespace separates tokens and is dropped;
/// anything else that no token class covers is a lexical error.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormulaLexer;

impl FormulaLexer {
    pub fn new() -> Self {
        FormulaLexer
    }
}

impl Lexer for FormulaLexer {
    fn lex(&self, input: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut end = 0;

        for m in TOKEN_RE.find_iter(input) {
            check_gap(input, end, m.start())?;
            let text = m.as_str();
            tokens.push(Token::new(Terminal::new(text.to_lowercase()), text, m.start()));
            end = m.end();
        }
        check_gap(input, end, input.len())?;

        trace!("lexed {} tokens from {:?}", tokens.len(), input);
        Ok(tokens)
    }
}

fn check_gap(input: &str, from: usize, to: usize) -> Result<()> {
    match input[from..to].char_indices().find(|(_, c)| !c.is_whitespace()) {
        Some((at, c)) => Err(Error::Lexical {
            message: format!("input string is not recognizable: unexpected `{}`", c),
            offset: from + at,
        }),
        None => Ok(()),
    }
}
