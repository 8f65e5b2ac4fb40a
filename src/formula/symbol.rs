//! Non-terminals of the formula grammar.

use crate::descent::NonTerminal;

pub const EXPR: NonTerminal = NonTerminal::new("Expr");
pub const EXPRX: NonTerminal = NonTerminal::new("Expr'");
pub const TERM: NonTerminal = NonTerminal::new("Term");
pub const TERMX: NonTerminal = NonTerminal::new("Term'");
pub const FACTOR: NonTerminal = NonTerminal::new("Factor");
pub const FACTORX: NonTerminal = NonTerminal::new("Factor'");

pub const FUNC_CALL: NonTerminal = NonTerminal::new("FuncCall");
pub const FUNC_NAME: NonTerminal = NonTerminal::new("FuncName");
pub const FUNC_ARG: NonTerminal = NonTerminal::new("FuncArg");
pub const FUNC_ARGX: NonTerminal = NonTerminal::new("FuncArg'");

pub const BOOL_COND: NonTerminal = NonTerminal::new("BoolCond");
pub const BOOL_EXPR: NonTerminal = NonTerminal::new("BoolExpr");
pub const BOOL_EXPRX: NonTerminal = NonTerminal::new("BoolExpr'");
pub const BOOL_TERM: NonTerminal = NonTerminal::new("BoolTerm");
pub const BOOL_TERMX: NonTerminal = NonTerminal::new("BoolTerm'");
pub const BOOL_FACTOR: NonTerminal = NonTerminal::new("BoolFactor");

pub const LOGIC_EXPR: NonTerminal = NonTerminal::new("LogicExpr");
pub const LOGIC_OR: NonTerminal = NonTerminal::new("LogicOr");
pub const LOGIC_AND: NonTerminal = NonTerminal::new("LogicAnd");
pub const LOGIC_NOT: NonTerminal = NonTerminal::new("LogicNot");
pub const LOGIC_OP: NonTerminal = NonTerminal::new("LogicOp");

pub const VARIABLE: NonTerminal = NonTerminal::new("Variable");
pub const NUMBER: NonTerminal = NonTerminal::new("Number");
