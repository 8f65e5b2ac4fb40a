//! Trace context: the chain of non-terminals currently being derived.
//!
//! A [`Trace`] is a persistent stack. [`Trace::push`] returns a new trace
//! that shares its tail with the original, so pushing is O(1), the caller's
//! trace is never modified, and a snapshot can be handed to another thread.
//! Traces only feed diagnostics; nothing reads them to make parsing or
//! evaluation decisions.

use super::symbol::NonTerminal;
use std::fmt;
use std::sync::Arc;

#[derive(Debug)]
struct Frame {
    symbol: NonTerminal,
    depth: usize,
    parent: Option<Arc<Frame>>,
}

/// Immutable, structurally shared stack of entered productions.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    head: Option<Arc<Frame>>,
}

impl Trace {
    /// The empty trace.
    pub fn new() -> Self {
        Trace { head: None }
    }

    /// Return a new trace with `symbol` on top.
    #[must_use]
    pub fn push(&self, symbol: NonTerminal) -> Trace {
        Trace {
            head: Some(Arc::new(Frame {
                symbol,
                depth: self.depth() + 1,
                parent: self.head.clone(),
            })),
        }
    }

    pub fn depth(&self) -> usize {
        self.head.as_ref().map_or(0, |frame| frame.depth)
    }

    /// Most recently entered production.
    pub fn top(&self) -> Option<NonTerminal> {
        self.head.as_ref().map(|frame| frame.symbol)
    }

    /// Symbols from the outermost production to the innermost.
    pub fn symbols(&self) -> Vec<NonTerminal> {
        let mut out = Vec::with_capacity(self.depth());
        let mut cursor = self.head.as_deref();
        while let Some(frame) = cursor {
            out.push(frame.symbol);
            cursor = frame.parent.as_deref();
        }
        out.reverse();
        out
    }

    /// Distance from the top of the trace to the nearest `symbol`, if any.
    pub fn lookup(&self, symbol: NonTerminal) -> Option<usize> {
        let mut cursor = self.head.as_deref();
        let mut distance = 0;
        while let Some(frame) = cursor {
            if frame.symbol == symbol {
                return Some(distance);
            }
            distance += 1;
            cursor = frame.parent.as_deref();
        }
        None
    }

    /// Join the symbol names with `sep`, most recent last.
    pub fn render(&self, sep: &str) -> String {
        self.symbols()
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(sep)
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(" > "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPR: NonTerminal = NonTerminal::new("Expr");
    const TERM: NonTerminal = NonTerminal::new("Term");
    const FACTOR: NonTerminal = NonTerminal::new("Factor");

    #[test]
    fn test_push_does_not_touch_caller() {
        let root = Trace::new().push(EXPR);
        let child = root.push(TERM);
        let grandchild = child.push(FACTOR);

        assert_eq!(root.depth(), 1);
        assert_eq!(child.depth(), 2);
        assert_eq!(grandchild.depth(), 3);
        assert_eq!(root.to_string(), "Expr");
        assert_eq!(grandchild.to_string(), "Expr > Term > Factor");
    }

    #[test]
    fn test_siblings_share_tail() {
        let base = Trace::new().push(EXPR).push(TERM);
        let a = base.push(FACTOR);
        let b = base.push(EXPR);
        assert_eq!(a.render("/"), "Expr/Term/Factor");
        assert_eq!(b.render("/"), "Expr/Term/Expr");
        assert_eq!(base.top(), Some(TERM));
    }

    #[test]
    fn test_lookup_counts_from_top() {
        let trace = Trace::new().push(EXPR).push(TERM).push(FACTOR);
        assert_eq!(trace.lookup(FACTOR), Some(0));
        assert_eq!(trace.lookup(EXPR), Some(2));
        assert_eq!(Trace::new().lookup(EXPR), None);
    }

    #[test]
    fn test_empty_trace_renders_empty() {
        let trace = Trace::new();
        assert_eq!(trace.depth(), 0);
        assert_eq!(trace.to_string(), "");
        assert_eq!(trace.top(), None);
    }

    #[test]
    fn test_snapshot_crosses_threads() {
        let trace = Trace::new().push(EXPR).push(TERM);
        let handle = std::thread::spawn({
            let trace = trace.clone();
            move || trace.push(FACTOR).to_string()
        });
        assert_eq!(handle.join().unwrap(), "Expr > Term > Factor");
        assert_eq!(trace.to_string(), "Expr > Term");
    }
}
