//! Batch verification of formulas against expected values.
//!
//! Test cases are read from comma-separated text: a header row, then one
//! `expression,expected` row per case. Expressions containing commas must be
//! double-quoted, with `""` standing for a literal quote; a quoted expression
//! may span several lines. An expected value
//! that does not parse as a number is taken as NaN, and so is the actual
//! value of an expression that fails to compile or evaluate; two NaNs
//! compare equal, so a row can assert that an expression is an error.

use super::engine::FormulaEngine;
use super::logic;
use super::variables::Variables;
use crate::common::number::fmt_num;
use crate::common::{Error, Result};
use log::{debug, warn};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// One row of a test-case file.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    /// 1-based line number in the source file.
    pub line: usize,
    pub expression: String,
    pub expected: f64,
}

/// Read test cases from `path`.
pub fn load_test_cases(path: impl AsRef<Path>) -> Result<Vec<TestCase>> {
    let file = File::open(path.as_ref())?;
    parse_test_cases(BufReader::new(file))
}

/// Read test cases from any buffered reader. The first record is a header.
pub fn parse_test_cases<R: BufRead>(mut reader: R) -> Result<Vec<TestCase>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let mut cases = Vec::new();
    for (line, fields) in split_records(&text).into_iter().skip(1) {
        if fields.len() == 1 && fields[0].trim().is_empty() {
            continue;
        }
        if fields.len() < 2 {
            warn!("line {}: expected `expression,expected`, skipping {:?}", line, fields[0]);
            continue;
        }

        let expected = fast_float2::parse(fields[1].trim()).unwrap_or(f64::NAN);
        cases.push(TestCase {
            line,
            expression: fields[0].trim().to_string(),
            expected,
        });
    }

    debug!("loaded {} test cases", cases.len());
    Ok(cases)
}

/// Split comma-separated text into records, honouring double quotes. A
/// newline inside quotes belongs to the field. Each record is paired with
/// the 1-based line it starts on.
fn split_records(text: &str) -> Vec<(usize, Vec<String>)> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut start = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            },
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            '\n' => {
                line += 1;
                if in_quotes {
                    current.push(c);
                } else {
                    fields.push(std::mem::take(&mut current));
                    records.push((start, std::mem::take(&mut fields)));
                    start = line;
                }
            },
            '\r' if !in_quotes => {},
            _ => current.push(c),
        }
    }
    if !fields.is_empty() || !current.is_empty() {
        fields.push(current);
        records.push((start, fields));
    }
    records
}

/// Result of running one [`TestCase`].
#[derive(Debug, Clone, PartialEq)]
pub struct TestOutcome {
    pub case: TestCase,
    pub actual: f64,
    pub passed: bool,
    /// Why the expression produced no value, if it failed.
    pub error: Option<Error>,
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [line {}] {} [expected:{} actual:{}]",
            if self.passed { "OK  " } else { "FAIL" },
            self.case.line,
            self.case.expression,
            fmt_num(self.case.expected),
            fmt_num(self.actual)
        )
    }
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestReport {
    pub outcomes: Vec<TestOutcome>,
}

impl TestReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "{}", outcome)?;
        }
        write!(f, "{} passed, {} failed", self.passed(), self.failed())
    }
}

/// Evaluate every case with `engine`, comparing with the engine's epsilon.
pub fn run_test_cases(engine: &FormulaEngine, cases: &[TestCase], variables: &Variables) -> TestReport {
    let epsilon = engine.config().epsilon;
    let outcomes = cases
        .iter()
        .map(|case| {
            let (actual, error) = match engine.eval(&case.expression, variables) {
                Ok(value) => (value, None),
                Err(err) => {
                    debug!("line {}: {}", case.line, err);
                    (f64::NAN, Some(err))
                },
            };
            TestOutcome {
                case: case.clone(),
                actual,
                passed: logic::equ(case.expected, actual, epsilon),
                error,
            }
        })
        .collect();
    TestReport { outcomes }
}
