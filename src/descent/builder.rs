//! Backtracking parse-tree builder.
//!
//! The builder owns the token stream, a cursor into it, and a flat
//! *fragment* of finished subtrees. Entering a production records a
//! checkpoint `(cursor, fragment length)`. Leaving it successfully folds every
//! fragment entry added since the checkpoint into one node for that
//! production; leaving it unsuccessfully truncates the fragment and rewinds
//! the cursor to the checkpoint. A failed alternative therefore leaves the
//! parent exactly as it found it.
//!
//! Productions normally go through [`Builder::derive`], which pairs every
//! enter with exactly one exit whatever the production returns.

use super::symbol::{NonTerminal, Terminal};
use super::token::Token;
use super::trace::Trace;
use super::tree::ParseTree;
use log::trace;
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    symbol: NonTerminal,
    cursor: usize,
    fragment_len: usize,
}

/// Proof that a production was entered; must be handed back to
/// [`Builder::exit`].
#[must_use = "every entered production must be exited"]
#[derive(Debug)]
pub struct Entered {
    depth: usize,
}

/// Result of a derivation step, as seen by the builder.
pub trait Outcome {
    fn succeeded(&self) -> bool;
}

impl Outcome for bool {
    #[inline]
    fn succeeded(&self) -> bool {
        *self
    }
}

/// An `Err` rolls the production back just like `Ok(false)`.
impl<E> Outcome for std::result::Result<bool, E> {
    #[inline]
    fn succeeded(&self) -> bool {
        matches!(self, Ok(true))
    }
}

/// Token cursor, tree under construction, and checkpoint stack.
#[derive(Debug)]
pub struct Builder {
    tokens: Vec<Token>,
    cursor: usize,
    fragment: Vec<ParseTree>,
    checkpoints: SmallVec<[Checkpoint; 32]>,
    last: Option<Token>,
}

impl Builder {
    pub fn new(tokens: Vec<Token>) -> Self {
        Builder {
            tokens,
            cursor: 0,
            fragment: Vec::new(),
            checkpoints: SmallVec::new(),
            last: None,
        }
    }

    /// Start deriving `symbol` at the current cursor.
    pub fn enter(&mut self, symbol: NonTerminal) -> Entered {
        self.checkpoints.push(Checkpoint {
            symbol,
            cursor: self.cursor,
            fragment_len: self.fragment.len(),
        });
        Entered {
            depth: self.checkpoints.len(),
        }
    }

    /// Finish the production opened by `entered`, committing its subtree on
    /// success and rolling back to its checkpoint otherwise.
    pub fn exit(&mut self, entered: Entered, success: bool) {
        debug_assert_eq!(
            entered.depth,
            self.checkpoints.len(),
            "productions must exit in reverse order of entry"
        );
        let Some(checkpoint) = self.checkpoints.pop() else {
            return;
        };

        if success {
            let children = self.fragment.split_off(checkpoint.fragment_len);
            self.fragment
                .push(ParseTree::node(checkpoint.symbol, children));
        } else {
            trace!(
                "rollback {} to token {} (from {})",
                checkpoint.symbol, checkpoint.cursor, self.cursor
            );
            self.restore(checkpoint);
        }
    }

    /// Derive `symbol` with `production`, pairing the enter and exit.
    ///
    /// The production receives the trace extended with `symbol`. Its outcome
    /// decides whether the subtree is committed or rolled back, and is
    /// returned unchanged.
    pub fn derive<O, F>(&mut self, trace: &Trace, symbol: NonTerminal, production: F) -> O
    where
        O: Outcome,
        F: FnOnce(&Trace, &mut Builder) -> O,
    {
        let trace = trace.push(symbol);
        let entered = self.enter(symbol);
        let outcome = production(&trace, self);
        self.exit(entered, outcome.succeeded());
        outcome
    }

    /// Token under the cursor, without consuming it.
    pub fn next(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    /// Consume the token under the cursor if it is `terminal`.
    pub fn match_token(&mut self, terminal: &Terminal) -> bool {
        match self.next() {
            Some(token) if token.is(terminal) => {
                let token = token.clone();
                self.add(token);
                true
            },
            _ => false,
        }
    }

    /// Consume the token under the cursor if `accept` approves it.
    ///
    /// Used for token classes recognised by pattern rather than by one fixed
    /// lexeme.
    pub fn match_with<F>(&mut self, accept: F) -> bool
    where
        F: FnOnce(&Token) -> bool,
    {
        match self.next() {
            Some(token) if accept(token) => {
                let token = token.clone();
                self.add(token);
                true
            },
            _ => false,
        }
    }

    /// Append `token` as a leaf of the current production and step past the
    /// token under the cursor.
    pub fn add(&mut self, token: Token) {
        self.fragment.push(ParseTree::leaf(token.clone()));
        self.cursor = (self.cursor + 1).min(self.tokens.len());
        self.last = Some(token);
    }

    /// Rewind the current production to where it was entered, discarding the
    /// leaves and subtrees it has collected so far. The production stays
    /// entered.
    pub fn backtrack(&mut self) {
        if let Some(checkpoint) = self.checkpoints.last().copied() {
            trace!(
                "backtrack {} to token {} (from {})",
                checkpoint.symbol, checkpoint.cursor, self.cursor
            );
            self.restore(checkpoint);
        }
    }

    /// The most recently matched or added token, kept across rollbacks.
    pub fn last(&self) -> Option<&Token> {
        self.last.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True once every token has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// Number of productions currently entered.
    pub fn depth(&self) -> usize {
        self.checkpoints.len()
    }

    /// The completed tree, once the entry production has been exited with
    /// success. Returns `None` if a production is still open or nothing (or
    /// more than one root) was committed.
    pub fn finalize(mut self) -> Option<ParseTree> {
        if !self.checkpoints.is_empty() || self.fragment.len() != 1 {
            return None;
        }
        self.fragment.pop()
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.cursor = checkpoint.cursor;
        self.fragment.truncate(checkpoint.fragment_len);
    }
}
