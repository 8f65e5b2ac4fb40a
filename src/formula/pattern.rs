//! Regular-language token classes: numbers, function names, and variables.

use once_cell::sync::Lazy;
use regex::Regex;

pub const NUMBER: &str = r"[0-9]+(?:\.[0-9]+)?(?:e[+-][0-9]+)?";
pub const FUNCTION: &str = r"[a-zA-Z][a-zA-Z0-9]*";
pub const VARIABLE: &str = r"\[([a-zA-Z0-9:-]+)\]";

/// Pattern classes in lexing priority order. A variable is tried before the
/// `[` operator could claim its opening bracket.
pub const DICT: [&str; 3] = [VARIABLE, NUMBER, FUNCTION];

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| anchored(NUMBER));
static FUNCTION_RE: Lazy<Regex> = Lazy::new(|| anchored(FUNCTION));
static VARIABLE_RE: Lazy<Regex> = Lazy::new(|| anchored(VARIABLE));

fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("^{}$", pattern)).expect("token pattern is a valid regex")
}

pub fn is_number(lexeme: &str) -> bool {
    NUMBER_RE.is_match(lexeme)
}

pub fn is_function(lexeme: &str) -> bool {
    FUNCTION_RE.is_match(lexeme)
}

pub fn is_variable(lexeme: &str) -> bool {
    VARIABLE_RE.is_match(lexeme)
}

/// The name between the brackets of a variable lexeme.
pub fn variable_name(lexeme: &str) -> Option<&str> {
    VARIABLE_RE
        .captures(lexeme)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
