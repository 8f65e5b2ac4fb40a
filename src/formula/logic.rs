//! Comparison operators with epsilon-tolerant equality.
//!
//! Two values are equal when both are the same special value (positive
//! infinity, negative infinity, or NaN), or when both are finite and differ
//! by at most `epsilon`. `<=` and `>=` are the strict comparison or equality.

use crate::descent::Terminal;

/// The six comparisons reachable from the eight `LogicOp` terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicOp {
    Equ,
    NotEqu,
    LtEqu,
    GtEqu,
    Lt,
    Gt,
}

impl LogicOp {
    /// Map an operator terminal to its comparison; `!=`, `~=` and `<>` all
    /// mean not-equal.
    pub fn from_terminal(terminal: &Terminal) -> Option<Self> {
        let op = match terminal.as_str() {
            "==" => LogicOp::Equ,
            "!=" | "~=" | "<>" => LogicOp::NotEqu,
            "<=" => LogicOp::LtEqu,
            ">=" => LogicOp::GtEqu,
            "<" => LogicOp::Lt,
            ">" => LogicOp::Gt,
            _ => return None,
        };
        Some(op)
    }

    pub fn apply(self, x: f64, y: f64, epsilon: f64) -> bool {
        match self {
            LogicOp::Equ => equ(x, y, epsilon),
            LogicOp::NotEqu => not_equ(x, y, epsilon),
            LogicOp::LtEqu => lt_equ(x, y, epsilon),
            LogicOp::GtEqu => gt_equ(x, y, epsilon),
            LogicOp::Lt => x < y,
            LogicOp::Gt => x > y,
        }
    }
}

#[derive(PartialEq)]
enum Special {
    PosInf,
    NegInf,
    NaN,
}

fn special(x: f64) -> Option<Special> {
    if x.is_nan() {
        Some(Special::NaN)
    } else if x == f64::INFINITY {
        Some(Special::PosInf)
    } else if x == f64::NEG_INFINITY {
        Some(Special::NegInf)
    } else {
        None
    }
}

pub fn equ(x: f64, y: f64, epsilon: f64) -> bool {
    match (special(x), special(y)) {
        (None, None) => (x - y).abs() <= epsilon,
        (a, b) => a == b,
    }
}

pub fn not_equ(x: f64, y: f64, epsilon: f64) -> bool {
    !equ(x, y, epsilon)
}

pub fn lt_equ(x: f64, y: f64, epsilon: f64) -> bool {
    x < y || equ(x, y, epsilon)
}

pub fn gt_equ(x: f64, y: f64, epsilon: f64) -> bool {
    x > y || equ(x, y, epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::token;

    const INF: f64 = f64::INFINITY;
    const NAN: f64 = f64::NAN;

    #[test]
    fn test_epsilon_equality() {
        assert!(equ(0.1, 0.105, 0.01));
        assert!(!equ(0.1, 0.105, 0.0));
        assert!(equ(3.0, 3.0, 0.0));
        assert!(not_equ(3.0, 3.5, 0.1));
    }

    #[test]
    fn test_special_values_equal_only_their_class() {
        assert!(equ(INF, INF, 0.0));
        assert!(equ(-INF, -INF, 0.0));
        assert!(equ(NAN, NAN, 0.0));
        assert!(!equ(INF, -INF, 0.0));
        assert!(!equ(INF, NAN, 0.0));
        assert!(!equ(NAN, 1.0, f64::MAX));
        assert!(!equ(1.0, INF, f64::MAX));
        // a huge epsilon must not make infinity equal to a finite value
        assert!(!equ(f64::MAX, INF, INF));
    }

    #[test]
    fn test_ordering_with_equality() {
        assert!(lt_equ(1.0, 2.0, 0.0));
        assert!(lt_equ(2.0, 2.0, 0.0));
        assert!(lt_equ(2.05, 2.0, 0.1));
        assert!(!lt_equ(2.5, 2.0, 0.1));
        assert!(gt_equ(2.0, 2.05, 0.1));
        assert!(gt_equ(INF, INF, 0.0));
        assert!(lt_equ(-INF, INF, 0.0));
        assert!(!lt_equ(NAN, 1.0, 0.0));
        assert!(lt_equ(NAN, NAN, 0.0));
    }

    #[test]
    fn test_operator_mapping() {
        assert_eq!(LogicOp::from_terminal(&token::EQU), Some(LogicOp::Equ));
        for ne in [token::NOT_EQU_A, token::NOT_EQU_B, token::NOT_EQU_C] {
            assert_eq!(LogicOp::from_terminal(&ne), Some(LogicOp::NotEqu));
        }
        assert_eq!(LogicOp::from_terminal(&token::LT_EQU), Some(LogicOp::LtEqu));
        assert_eq!(LogicOp::from_terminal(&token::GT_EQU), Some(LogicOp::GtEqu));
        assert_eq!(LogicOp::from_terminal(&token::LT), Some(LogicOp::Lt));
        assert_eq!(LogicOp::from_terminal(&token::GT), Some(LogicOp::Gt));
        assert_eq!(LogicOp::from_terminal(&token::ADD), None);
        assert!(LogicOp::Gt.apply(2.0, 1.0, 0.0));
        assert!(!LogicOp::NotEqu.apply(1.0, 1.0, 0.0));
    }
}
