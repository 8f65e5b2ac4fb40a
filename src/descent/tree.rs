//! The compiled parse tree and its traversal API.
//!
//! The evaluator walks the tree by position, asserting the symbol it expects
//! at each step. A failed assertion means the tree does not match the grammar
//! the evaluator was written against; it is reported as [`Error::Internal`]
//! rather than a panic so a hosting process survives the defect.

use super::symbol::{NonTerminal, Symbol, Terminal};
use super::token::Token;
use crate::common::{Error, Result};
use std::fmt;

/// A node of the parse tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseTree {
    /// A matched token.
    Leaf(Token),
    /// A derived production and its children, in input order.
    Node {
        symbol: NonTerminal,
        children: Vec<ParseTree>,
    },
}

impl ParseTree {
    pub fn leaf(token: Token) -> Self {
        ParseTree::Leaf(token)
    }

    pub fn node(symbol: NonTerminal, children: Vec<ParseTree>) -> Self {
        ParseTree::Node { symbol, children }
    }

    pub fn symbol(&self) -> Symbol {
        match self {
            ParseTree::Leaf(token) => Symbol::Terminal(token.terminal().clone()),
            ParseTree::Node { symbol, .. } => Symbol::NonTerminal(*symbol),
        }
    }

    /// Child nodes; empty for leaves.
    pub fn children(&self) -> &[ParseTree] {
        match self {
            ParseTree::Leaf(_) => &[],
            ParseTree::Node { children, .. } => children,
        }
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children().is_empty()
    }

    /// True when the node has exactly `n` children.
    pub fn has(&self, n: usize) -> bool {
        self.len() == n
    }

    pub fn get(&self, index: usize) -> Option<&ParseTree> {
        self.children().get(index)
    }

    /// Child at `index`, or an internal error when the node is too short.
    pub fn at(&self, index: usize) -> Result<&ParseTree> {
        self.get(index).ok_or_else(|| {
            Error::internal(format!(
                "no child at index {} of `{}` ({} children)",
                index,
                self.symbol(),
                self.len()
            ))
        })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ParseTree::Leaf(_))
    }

    pub fn is_terminal_of(&self, terminal: &Terminal) -> bool {
        matches!(self, ParseTree::Leaf(token) if token.is(terminal))
    }

    pub fn is_non_terminal(&self) -> bool {
        matches!(self, ParseTree::Node { .. })
    }

    pub fn is_non_terminal_of(&self, non_terminal: NonTerminal) -> bool {
        matches!(self, ParseTree::Node { symbol, .. } if *symbol == non_terminal)
    }

    /// The token held by a leaf.
    pub fn as_token(&self) -> Result<&Token> {
        match self {
            ParseTree::Leaf(token) => Ok(token),
            ParseTree::Node { .. } => Err(Error::internal("not a terminal symbol")),
        }
    }

    pub fn as_terminal(&self) -> Result<&Terminal> {
        self.as_token().map(Token::terminal)
    }

    pub fn as_non_terminal(&self) -> Result<NonTerminal> {
        match self {
            ParseTree::Node { symbol, .. } => Ok(*symbol),
            ParseTree::Leaf(_) => Err(Error::internal("not a non-terminal symbol")),
        }
    }

    pub fn assert_terminal(&self) -> Result<&Self> {
        if self.is_terminal() {
            Ok(self)
        } else {
            Err(Error::internal("expecting terminal symbol"))
        }
    }

    pub fn assert_terminal_of(&self, terminal: &Terminal) -> Result<&Self> {
        if self.is_terminal_of(terminal) {
            Ok(self)
        } else {
            Err(Error::internal(format!(
                "invalid terminal symbol `{}`, expecting `{}`",
                self.symbol(),
                terminal
            )))
        }
    }

    pub fn assert_non_terminal(&self) -> Result<&Self> {
        if self.is_non_terminal() {
            Ok(self)
        } else {
            Err(Error::internal("expecting non-terminal symbol"))
        }
    }

    pub fn assert_non_terminal_of(&self, non_terminal: NonTerminal) -> Result<&Self> {
        if self.is_non_terminal_of(non_terminal) {
            Ok(self)
        } else {
            Err(Error::internal(format!(
                "invalid non-terminal symbol `{}`, expecting `{}`",
                self.symbol(),
                non_terminal
            )))
        }
    }

    /// Terminal lexemes under this node, left to right.
    ///
    /// Each call starts a fresh walk.
    pub fn lexemes(&self) -> Lexemes<'_> {
        Lexemes { stack: vec![self] }
    }

    pub fn render(&self, sep: &str) -> String {
        self.lexemes().collect::<Vec<_>>().join(sep)
    }

    /// Height of the tree; a lone leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(ParseTree::depth).max().unwrap_or(0)
    }
}

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(" "))
    }
}

/// Depth-first iterator over the lexemes of a subtree.
pub struct Lexemes<'a> {
    stack: Vec<&'a ParseTree>,
}

impl<'a> Iterator for Lexemes<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                ParseTree::Leaf(token) => return Some(token.terminal().as_str()),
                ParseTree::Node { children, .. } => self.stack.extend(children.iter().rev()),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorKind;

    const EXPR: NonTerminal = NonTerminal::new("Expr");
    const EXPRX: NonTerminal = NonTerminal::new("Expr'");
    const NUMBER: NonTerminal = NonTerminal::new("Number");
    const ADD: Terminal = Terminal::from_static("+");

    fn leaf(lexeme: &str) -> ParseTree {
        ParseTree::leaf(Token::new(Terminal::new(lexeme), lexeme, 0))
    }

    fn sample() -> ParseTree {
        // 1 + 2, with an empty Expr' at the tail
        ParseTree::node(
            EXPR,
            vec![
                ParseTree::node(NUMBER, vec![leaf("1")]),
                ParseTree::node(
                    EXPRX,
                    vec![
                        leaf("+"),
                        ParseTree::node(
                            EXPR,
                            vec![
                                ParseTree::node(NUMBER, vec![leaf("2")]),
                                ParseTree::node(EXPRX, vec![]),
                            ],
                        ),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn test_positional_access() {
        let tree = sample();
        assert!(tree.has(2));
        assert!(tree.at(0).unwrap().is_non_terminal_of(NUMBER));
        assert!(tree.at(1).unwrap().at(0).unwrap().is_terminal_of(&ADD));
        assert!(tree.get(2).is_none());
    }

    #[test]
    fn test_assertions_report_internal_errors() {
        let tree = sample();
        assert!(tree.assert_non_terminal_of(EXPR).is_ok());

        let err = tree.assert_non_terminal_of(EXPRX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);

        let err = tree.at(5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);

        let plus = tree.at(1).unwrap().at(0).unwrap();
        assert!(plus.assert_terminal().is_ok());
        assert!(plus.assert_terminal_of(&ADD).is_ok());
        assert!(plus.as_non_terminal().is_err());
        assert!(tree.as_terminal().is_err());
    }

    #[test]
    fn test_lexemes_skip_empty_nodes_and_restart() {
        let tree = sample();
        assert_eq!(tree.lexemes().collect::<Vec<_>>(), vec!["1", "+", "2"]);
        // A second walk starts over
        assert_eq!(tree.lexemes().count(), 3);
        assert_eq!(tree.to_string(), "1 + 2");
        assert_eq!(tree.render(""), "1+2");
    }

    #[test]
    fn test_depth() {
        assert_eq!(leaf("1").depth(), 1);
        assert_eq!(sample().depth(), 5);
    }
}
