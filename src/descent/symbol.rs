//! Grammar symbols: terminals (token kinds) and non-terminals (productions).

use std::borrow::Cow;
use std::fmt;

/// A token kind, identified by its lexeme.
///
/// Fixed terminals such as `+` or `mod` are built at compile time with
/// [`Terminal::from_static`]; pattern-matched lexemes (numbers, identifiers,
/// variables) are built from the lexer's output. Equality is by value, so a
/// lexed `mod` equals the `mod` constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Terminal(Cow<'static, str>);

impl Terminal {
    pub const fn from_static(lexeme: &'static str) -> Self {
        Terminal(Cow::Borrowed(lexeme))
    }

    pub fn new(lexeme: impl Into<String>) -> Self {
        Terminal(Cow::Owned(lexeme.into()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Terminal {
    fn from(s: &str) -> Self {
        Terminal::new(s)
    }
}

/// A named grammar production such as `Expr` or `BoolFactor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonTerminal(&'static str);

impl NonTerminal {
    pub const fn new(name: &'static str) -> Self {
        NonTerminal(name)
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Either kind of grammar symbol, as stored on a parse-tree node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
}

impl Symbol {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn is_non_terminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(t) => t.fmt(f),
            Symbol::NonTerminal(n) => n.fmt(f),
        }
    }
}

impl From<Terminal> for Symbol {
    fn from(t: Terminal) -> Self {
        Symbol::Terminal(t)
    }
}

impl From<NonTerminal> for Symbol {
    fn from(n: NonTerminal) -> Self {
        Symbol::NonTerminal(n)
    }
}
