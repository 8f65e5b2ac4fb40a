//! Terminal alphabet of the formula language.

use crate::descent::Terminal;

pub const ADD: Terminal = Terminal::from_static("+");
pub const SUB: Terminal = Terminal::from_static("-");
pub const MUL: Terminal = Terminal::from_static("*");
pub const DIV: Terminal = Terminal::from_static("/");
pub const MOD: Terminal = Terminal::from_static("mod");
/// Unary minus; same lexeme as [`SUB`].
pub const MINUS: Terminal = Terminal::from_static("-");
pub const LPAREN: Terminal = Terminal::from_static("(");
pub const RPAREN: Terminal = Terminal::from_static(")");
pub const LSQUARE: Terminal = Terminal::from_static("[");
pub const RSQUARE: Terminal = Terminal::from_static("]");
pub const COMMA: Terminal = Terminal::from_static(",");
pub const QUESTION: Terminal = Terminal::from_static("?");
pub const COLON: Terminal = Terminal::from_static(":");

pub const EQU: Terminal = Terminal::from_static("==");
pub const NOT_EQU_A: Terminal = Terminal::from_static("!=");
pub const NOT_EQU_B: Terminal = Terminal::from_static("~=");
pub const NOT_EQU_C: Terminal = Terminal::from_static("<>");
pub const LT_EQU: Terminal = Terminal::from_static("<=");
pub const GT_EQU: Terminal = Terminal::from_static(">=");
pub const LT: Terminal = Terminal::from_static("<");
pub const GT: Terminal = Terminal::from_static(">");

pub const OR_NOTATION: Terminal = Terminal::from_static("||");
pub const OR_TEXT: Terminal = Terminal::from_static("or");
pub const AND_NOTATION: Terminal = Terminal::from_static("&&");
pub const AND_TEXT: Terminal = Terminal::from_static("and");
pub const NOT_NOTATION_A: Terminal = Terminal::from_static("!");
pub const NOT_NOTATION_B: Terminal = Terminal::from_static("~");
pub const NOT_TEXT: Terminal = Terminal::from_static("not");

/// The eight comparison operators accepted by `LogicOp`.
pub const LOGIC_OPS: [Terminal; 8] = [EQU, NOT_EQU_A, NOT_EQU_B, NOT_EQU_C, LT_EQU, GT_EQU, LT, GT];

/// Every fixed terminal, in dictionary order.
pub fn dict() -> [Terminal; 28] {
    [
        ADD, SUB, MUL, DIV, MOD, MINUS, LPAREN, RPAREN, LSQUARE, RSQUARE, COMMA, QUESTION, COLON,
        EQU, NOT_EQU_A, NOT_EQU_B, NOT_EQU_C, LT_EQU, GT_EQU, LT, GT, OR_NOTATION, OR_TEXT,
        AND_NOTATION, AND_TEXT, NOT_NOTATION_A, NOT_NOTATION_B, NOT_TEXT,
    ]
}

/// True for the eight comparison operators.
pub fn is_logic_op(terminal: &Terminal) -> bool {
    LOGIC_OPS.contains(terminal)
}

/// True for terminals spelled as words, which the lexer tries before identifiers.
pub fn is_keyword(terminal: &Terminal) -> bool {
    terminal
        .as_str()
        .bytes()
        .next()
        .is_some_and(|b| b.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logic_ops() {
        for op in ["==", "!=", "~=", "<>", "<=", ">=", "<", ">"] {
            assert!(is_logic_op(&Terminal::new(op)), "{}", op);
        }
        assert!(!is_logic_op(&ADD));
        assert!(!is_logic_op(&NOT_NOTATION_A));
    }

    #[test]
    fn test_keywords() {
        let words: Vec<_> = dict()
            .iter()
            .filter(|t| is_keyword(t))
            .map(|t| t.to_string())
            .collect();
        assert_eq!(words, vec!["mod", "or", "and", "not"]);
    }
}
