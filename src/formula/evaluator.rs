//! Tree-walking evaluator for compiled formulas.
//!
//! There is one evaluation function per non-terminal. Each pushes its symbol
//! onto the [`Trace`] before descending, so an error raised anywhere below
//! carries the chain of productions that led to it. Shape mismatches between
//! the tree and the grammar surface as internal errors; user-facing failures
//! (unknown names, arity, bad operators) surface as evaluation errors.

use super::library::Library;
use super::logic::LogicOp;
use super::symbol::*;
use super::variables::Variables;
use super::{pattern, token};
use crate::common::{Error, EvaluationError, Result};
use crate::descent::{ParseTree, Trace};
use log::debug;
use smallvec::SmallVec;

/// Evaluates parse trees against a function library and variable bindings.
///
/// `epsilon` is the tolerance used by `==`, `!=`, `<=` and `>=`.
#[derive(Clone, Copy)]
pub struct Evaluator<'a> {
    library: &'a dyn Library,
    variables: &'a Variables,
    epsilon: f64,
}

impl<'a> Evaluator<'a> {
    pub fn new(library: &'a dyn Library, variables: &'a Variables) -> Self {
        Evaluator {
            library,
            variables,
            epsilon: 0.0,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Evaluate a tree rooted at `Expr`, or at `BoolCond` for an
    /// unparenthesised conditional.
    pub fn evaluate(&self, tree: &ParseTree) -> Result<f64> {
        let value = if tree.is_non_terminal_of(BOOL_COND) {
            self.bool_cond(&Trace::new(), tree)?
        } else {
            self.expr(&Trace::new(), tree)?
        };
        debug!("evaluated `{}` = {}", tree, value);
        Ok(value)
    }

    /// Evaluate a tree rooted at `BoolExpr`.
    pub fn evaluate_condition(&self, tree: &ParseTree) -> Result<bool> {
        let value = self.bool_expr(&Trace::new(), tree)?;
        debug!("evaluated condition `{}` = {}", tree, value);
        Ok(value)
    }

    fn expr(&self, trace: &Trace, t: &ParseTree) -> Result<f64> {
        let trace = trace.push(EXPR);
        t.assert_non_terminal_of(EXPR)?;

        let term = self.term(&trace, t.at(0)?)?;
        let tail = t.at(1)?.assert_non_terminal_of(EXPRX)?;
        if tail.is_empty() {
            return Ok(term);
        }

        let op = tail.at(0)?.as_terminal()?;
        let rest = self.expr(&trace, tail.at(1)?)?;
        if *op == token::ADD {
            Ok(term + rest)
        } else if *op == token::SUB {
            Ok(term - rest)
        } else {
            Err(Error::internal(format!("invalid additive operator `{}`", op)))
        }
    }

    fn term(&self, trace: &Trace, t: &ParseTree) -> Result<f64> {
        let trace = trace.push(TERM);
        t.assert_non_terminal_of(TERM)?;

        let factor = self.factor(&trace, t.at(0)?)?;
        let tail = t.at(1)?.assert_non_terminal_of(TERMX)?;
        if tail.is_empty() {
            return Ok(factor);
        }

        let op = tail.at(0)?.as_terminal()?;
        let rest = self.term(&trace, tail.at(1)?)?;
        if *op == token::MUL {
            Ok(factor * rest)
        } else if *op == token::DIV {
            Ok(factor / rest)
        } else if *op == token::MOD {
            Ok(factor.trunc() % rest.trunc())
        } else {
            Err(Error::internal(format!("invalid multiplicative operator `{}`", op)))
        }
    }

    fn factor(&self, trace: &Trace, t: &ParseTree) -> Result<f64> {
        let trace = trace.push(FACTOR);
        t.assert_non_terminal_of(FACTOR)?;

        let first = t.at(0)?;
        if first.is_terminal_of(&token::LPAREN) {
            return self.factorx(&trace, t.at(1)?);
        }
        if first.is_terminal_of(&token::MINUS) {
            return Ok(-self.factor(&trace, t.at(1)?)?);
        }
        if first.is_non_terminal_of(VARIABLE) {
            return self.variable(&trace, first);
        }
        if first.is_non_terminal_of(NUMBER) {
            return self.number(first);
        }
        if first.is_non_terminal_of(FUNC_CALL) {
            return self.func_call(&trace, first);
        }
        Err(Error::internal(format!("invalid expression `{}`", t)))
    }

    fn factorx(&self, trace: &Trace, t: &ParseTree) -> Result<f64> {
        let trace = trace.push(FACTORX);
        t.assert_non_terminal_of(FACTORX)?;
        t.at(1)?.assert_terminal_of(&token::RPAREN)?;

        let inner = t.at(0)?;
        if inner.is_non_terminal_of(BOOL_COND) {
            self.bool_cond(&trace, inner)
        } else {
            self.expr(&trace, inner)
        }
    }

    fn func_call(&self, trace: &Trace, t: &ParseTree) -> Result<f64> {
        let trace = trace.push(FUNC_CALL);
        t.at(1)?.assert_terminal_of(&token::LPAREN)?;
        t.at(3)?.assert_terminal_of(&token::RPAREN)?;

        let name = self.func_name(t.at(0)?)?;
        let function = self.library.resolve(name).ok_or_else(|| {
            Error::evaluation(
                EvaluationError::UnrecognizedFunction(name.to_string()),
                trace.to_string(),
            )
        })?;

        let args = self.func_arg(&trace, t.at(2)?)?;
        function.call(&trace, &args)
    }

    fn func_name<'t>(&self, t: &'t ParseTree) -> Result<&'t str> {
        t.assert_non_terminal_of(FUNC_NAME)?;
        Ok(t.at(0)?.as_terminal()?.as_str())
    }

    /// Flattens the right-recursive argument list, left to right.
    fn func_arg(&self, trace: &Trace, t: &ParseTree) -> Result<SmallVec<[f64; 8]>> {
        let mut args = SmallVec::new();
        let mut trace = trace.push(FUNC_ARG);
        let mut node = t.assert_non_terminal_of(FUNC_ARG)?;

        while !node.is_empty() {
            args.push(self.expr(&trace, node.at(0)?)?);

            let tail = node.at(1)?.assert_non_terminal_of(FUNC_ARGX)?;
            if tail.is_empty() {
                break;
            }
            tail.at(0)?.assert_terminal_of(&token::COMMA)?;
            node = tail.at(1)?.assert_non_terminal_of(FUNC_ARG)?;
            trace = trace.push(FUNC_ARG);
        }
        Ok(args)
    }

    fn bool_cond(&self, trace: &Trace, t: &ParseTree) -> Result<f64> {
        let trace = trace.push(BOOL_COND);
        t.assert_non_terminal_of(BOOL_COND)?;
        t.at(1)?.assert_terminal_of(&token::QUESTION)?;
        t.at(3)?.assert_terminal_of(&token::COLON)?;

        // only the selected branch is evaluated
        if self.bool_expr(&trace, t.at(0)?)? {
            self.expr(&trace, t.at(2)?)
        } else {
            self.expr(&trace, t.at(4)?)
        }
    }

    fn bool_expr(&self, trace: &Trace, t: &ParseTree) -> Result<bool> {
        let trace = trace.push(BOOL_EXPR);
        t.assert_non_terminal_of(BOOL_EXPR)?;

        let tail = t.at(1)?.assert_non_terminal_of(BOOL_EXPRX)?;
        if self.bool_term(&trace, t.at(0)?)? {
            return Ok(true);
        }
        if tail.is_empty() {
            return Ok(false);
        }

        tail.at(0)?.assert_non_terminal_of(LOGIC_OR)?;
        self.bool_expr(&trace, tail.at(1)?)
    }

    fn bool_term(&self, trace: &Trace, t: &ParseTree) -> Result<bool> {
        let trace = trace.push(BOOL_TERM);
        t.assert_non_terminal_of(BOOL_TERM)?;

        let tail = t.at(1)?.assert_non_terminal_of(BOOL_TERMX)?;
        if !self.bool_factor(&trace, t.at(0)?)? {
            return Ok(false);
        }
        if tail.is_empty() {
            return Ok(true);
        }

        tail.at(0)?.assert_non_terminal_of(LOGIC_AND)?;
        self.bool_term(&trace, tail.at(1)?)
    }

    fn bool_factor(&self, trace: &Trace, t: &ParseTree) -> Result<bool> {
        let trace = trace.push(BOOL_FACTOR);
        t.assert_non_terminal_of(BOOL_FACTOR)?;

        let first = t.at(0)?;
        match t.len() {
            2 if first.is_non_terminal_of(LOGIC_NOT) => Ok(!self.bool_factor(&trace, t.at(1)?)?),
            3 if first.is_terminal_of(&token::LPAREN) => {
                t.at(2)?.assert_terminal_of(&token::RPAREN)?;
                self.bool_expr(&trace, t.at(1)?)
            },
            1 if first.is_non_terminal_of(LOGIC_EXPR) => self.logic_expr(&trace, first),
            _ => Err(Error::internal(format!("invalid boolean factor `{}`", t))),
        }
    }

    fn logic_expr(&self, trace: &Trace, t: &ParseTree) -> Result<bool> {
        let trace = trace.push(LOGIC_EXPR);

        let lhs = self.expr(&trace, t.at(0)?)?;
        let op = self.logic_op(&trace, t.at(1)?)?;
        let rhs = self.expr(&trace, t.at(2)?)?;
        Ok(op.apply(lhs, rhs, self.epsilon))
    }

    fn logic_op(&self, trace: &Trace, t: &ParseTree) -> Result<LogicOp> {
        let trace = trace.push(LOGIC_OP);
        t.assert_non_terminal_of(LOGIC_OP)?;

        let terminal = t.at(0)?.as_terminal()?;
        LogicOp::from_terminal(terminal).ok_or_else(|| {
            Error::evaluation(
                EvaluationError::InvalidOperator(terminal.to_string()),
                trace.to_string(),
            )
        })
    }

    fn variable(&self, trace: &Trace, t: &ParseTree) -> Result<f64> {
        let trace = trace.push(VARIABLE);

        let lexeme = t.at(0)?.as_terminal()?.as_str();
        let name = pattern::variable_name(lexeme)
            .ok_or_else(|| Error::internal(format!("failed to extract variable from `{}`", lexeme)))?;
        self.variables.get(name).ok_or_else(|| {
            Error::evaluation(
                EvaluationError::UnknownVariable(name.to_string()),
                trace.to_string(),
            )
        })
    }

    fn number(&self, t: &ParseTree) -> Result<f64> {
        let lexeme = t.at(0)?.as_terminal()?.as_str();
        fast_float2::parse(lexeme)
            .map_err(|_| Error::internal(format!("error parsing number `{}`", lexeme)))
    }
}
