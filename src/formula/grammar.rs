//! Production rules of the formula language.
//!
//! ```text
//! Expr       := Term Expr'
//! Expr'      := "+" Expr | "-" Expr | ε
//! Term       := Factor Term'
//! Term'      := "*" Term | "/" Term | "mod" Term | ε
//! Factor     := "(" Factor' | "-" Factor | Variable | Number | FuncCall
//! Factor'    := BoolCond ")" | Expr ")"
//!
//! FuncCall   := FuncName "(" FuncArg ")"
//! FuncName   := <function>
//! FuncArg    := Expr FuncArg' | ε
//! FuncArg'   := "," FuncArg | ε
//!
//! BoolCond   := BoolExpr "?" Expr ":" Expr
//! BoolExpr   := BoolTerm BoolExpr'
//! BoolExpr'  := LogicOr BoolExpr | ε
//! BoolTerm   := BoolFactor BoolTerm'
//! BoolTerm'  := LogicAnd BoolTerm | ε
//! BoolFactor := LogicNot BoolFactor | "(" BoolExpr ")" | LogicExpr
//!
//! LogicExpr  := Expr LogicOp Expr
//! LogicOr    := "||" | "or"
//! LogicAnd   := "&&" | "and"
//! LogicNot   := "!" | "~" | "not"
//! LogicOp    := "==" | "!=" | "~=" | "<>" | "<=" | ">=" | "<" | ">"
//!
//! Variable   := <variable>
//! Number     := <number>
//! ```
//!
//! Alternatives are tried in the order written and the first match wins.
//! The tail productions are right recursive, so `1-2-3` groups as
//! `1-(2-3)`. Evaluation depends on this grouping.
//!
//! Compile time is exponential in parenthesis nesting depth. Each `(` tries
//! `BoolCond` before `Expr`, and `BoolFactor` retries a failed `(` as
//! `LogicExpr`, so every level re-parses its contents a few times. A dozen
//! levels already cost a noticeable fraction of a second.

use super::symbol::*;
use super::{pattern, token};
use crate::descent::{Builder, Grammar, Trace};

/// Which production a compile starts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Entry {
    /// A numeric formula (`Expr`).
    #[default]
    Expression,
    /// A bare boolean condition (`BoolExpr`), e.g. `(1==1)&&(2==2)`.
    Condition,
    /// An unparenthesised conditional (`BoolCond`), e.g. `1<2?10:20`.
    Conditional,
}

/// The formula grammar, driven over a [`Builder`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FormulaGrammar {
    entry: Entry,
}

impl FormulaGrammar {
    pub fn new() -> Self {
        FormulaGrammar::default()
    }

    /// Grammar whose entry point is a boolean condition.
    pub fn condition() -> Self {
        FormulaGrammar {
            entry: Entry::Condition,
        }
    }

    pub fn with_entry(entry: Entry) -> Self {
        FormulaGrammar { entry }
    }

    pub fn entry(&self) -> Entry {
        self.entry
    }

    pub fn expr(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, EXPR, |trace, b| self.term(trace, b) && self.exprx(trace, b))
    }

    fn exprx(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, EXPRX, |trace, b| {
            if b.match_token(&token::ADD) || b.match_token(&token::SUB) {
                return self.expr(trace, b);
            }
            true
        })
    }

    fn term(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, TERM, |trace, b| self.factor(trace, b) && self.termx(trace, b))
    }

    fn termx(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, TERMX, |trace, b| {
            if b.match_token(&token::MUL)
                || b.match_token(&token::DIV)
                || b.match_token(&token::MOD)
            {
                return self.term(trace, b);
            }
            true
        })
    }

    fn factor(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, FACTOR, |trace, b| {
            if b.match_token(&token::LPAREN) {
                return self.factorx(trace, b);
            }
            if b.match_token(&token::MINUS) {
                return self.factor(trace, b);
            }
            if self.variable(trace, b) || self.number(trace, b) {
                return true;
            }
            self.func_call(trace, b)
        })
    }

    fn factorx(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, FACTORX, |trace, b| {
            if self.bool_cond(trace, b) {
                return b.match_token(&token::RPAREN);
            }
            if self.expr(trace, b) {
                return b.match_token(&token::RPAREN);
            }
            false
        })
    }

    fn func_call(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, FUNC_CALL, |trace, b| {
            self.func_name(trace, b)
                && b.match_token(&token::LPAREN)
                && self.func_arg(trace, b)
                && b.match_token(&token::RPAREN)
        })
    }

    fn func_name(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, FUNC_NAME, |_, b| {
            b.match_with(|t| pattern::is_function(t.terminal().as_str()))
        })
    }

    fn func_arg(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, FUNC_ARG, |trace, b| {
            if self.expr(trace, b) && self.func_argx(trace, b) {
                return true;
            }
            b.backtrack();
            true
        })
    }

    fn func_argx(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, FUNC_ARGX, |trace, b| {
            if b.match_token(&token::COMMA) {
                return self.func_arg(trace, b);
            }
            true
        })
    }

    fn bool_cond(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, BOOL_COND, |trace, b| {
            self.bool_expr(trace, b)
                && b.match_token(&token::QUESTION)
                && self.expr(trace, b)
                && b.match_token(&token::COLON)
                && self.expr(trace, b)
        })
    }

    pub fn bool_expr(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, BOOL_EXPR, |trace, b| {
            self.bool_term(trace, b) && self.bool_exprx(trace, b)
        })
    }

    fn bool_exprx(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, BOOL_EXPRX, |trace, b| {
            if self.logic_or(trace, b) {
                return self.bool_expr(trace, b);
            }
            true
        })
    }

    fn bool_term(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, BOOL_TERM, |trace, b| {
            self.bool_factor(trace, b) && self.bool_termx(trace, b)
        })
    }

    fn bool_termx(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, BOOL_TERMX, |trace, b| {
            if self.logic_and(trace, b) {
                return self.bool_term(trace, b);
            }
            true
        })
    }

    fn bool_factor(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, BOOL_FACTOR, |trace, b| {
            if self.logic_not(trace, b) {
                return self.bool_factor(trace, b);
            }

            if b.match_token(&token::LPAREN)
                && self.bool_expr(trace, b)
                && b.match_token(&token::RPAREN)
            {
                return true;
            }
            // `(` may open an arithmetic operand of a comparison instead,
            // e.g. `(1+2)>2`; retry from the same position as LogicExpr.
            b.backtrack();

            self.logic_expr(trace, b)
        })
    }

    fn logic_expr(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, LOGIC_EXPR, |trace, b| {
            self.expr(trace, b) && self.logic_op(trace, b) && self.expr(trace, b)
        })
    }

    fn logic_or(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, LOGIC_OR, |_, b| {
            b.match_token(&token::OR_NOTATION) || b.match_token(&token::OR_TEXT)
        })
    }

    fn logic_and(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, LOGIC_AND, |_, b| {
            b.match_token(&token::AND_NOTATION) || b.match_token(&token::AND_TEXT)
        })
    }

    fn logic_not(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, LOGIC_NOT, |_, b| {
            b.match_token(&token::NOT_NOTATION_A)
                || b.match_token(&token::NOT_NOTATION_B)
                || b.match_token(&token::NOT_TEXT)
        })
    }

    fn logic_op(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, LOGIC_OP, |_, b| b.match_with(|t| token::is_logic_op(t.terminal())))
    }

    fn variable(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, VARIABLE, |_, b| {
            b.match_with(|t| pattern::is_variable(t.terminal().as_str()))
        })
    }

    fn number(&self, trace: &Trace, b: &mut Builder) -> bool {
        b.derive(trace, NUMBER, |_, b| {
            b.match_with(|t| pattern::is_number(t.terminal().as_str()))
        })
    }
}

impl Grammar for FormulaGrammar {
    fn build_parse_tree(&self, trace: &Trace, builder: &mut Builder) -> bool {
        match self.entry {
            Entry::Expression => self.expr(trace, builder),
            Entry::Condition => self.bool_expr(trace, builder),
            Entry::Conditional => self.bool_cond(trace, builder),
        }
    }
}
