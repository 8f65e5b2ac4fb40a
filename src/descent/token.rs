//! Lexical units fed to the builder.

use super::symbol::Terminal;
use std::fmt;

/// One token of input: its terminal kind, the source text it came from, and
/// the byte offset of that text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    terminal: Terminal,
    text: String,
    offset: usize,
}

impl Token {
    pub fn new(terminal: Terminal, text: impl Into<String>, offset: usize) -> Self {
        Token {
            terminal,
            text: text.into(),
            offset,
        }
    }

    #[inline]
    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    /// The source text, before case folding.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn is(&self, terminal: &Terminal) -> bool {
        &self.terminal == terminal
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.terminal.fmt(f)
    }
}

/// Build a token stream from bare lexemes, one token per lexeme.
///
/// Offsets count lexemes joined without separators, which is enough for
/// diagnostics in tests and hand-built streams.
pub fn tokens<'a>(lexemes: impl IntoIterator<Item = &'a str>) -> Vec<Token> {
    let mut offset = 0;
    lexemes
        .into_iter()
        .map(|lexeme| {
            let token = Token::new(Terminal::new(lexeme), lexeme, offset);
            offset += lexeme.len();
            token
        })
        .collect()
}
