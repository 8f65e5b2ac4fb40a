//! The built-in function library.
//!
//! | name              | arity | result                                    |
//! |-------------------|-------|-------------------------------------------|
//! | `pow`             | 2     | `a` raised to `b`                         |
//! | `round`           | 2     | `x` rounded half away from zero to `n` places |
//! | `min`             | any   | smallest argument, `+inf` when empty      |
//! | `max`             | any   | largest argument, `-inf` when empty       |
//! | `sum`             | any   | sum of arguments, `0` when empty          |
//! | `avg`, `average`  | any   | arithmetic mean, NaN when empty           |
//!
//! `min` and `max` propagate NaN.

use super::library::{Function, Library, validate};
use crate::common::Result;
use crate::descent::Trace;
use phf::phf_map;

type NativeFn = fn(&Trace, &[f64]) -> Result<f64>;

static STD_FUNCTIONS: phf::Map<&'static str, NativeFn> = phf_map! {
    "pow" => pow,
    "round" => round,
    "min" => min,
    "max" => max,
    "sum" => sum,
    "avg" => avg,
    "average" => avg,
};

/// Stateless library over the built-in functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdLibrary;

impl StdLibrary {
    /// Names of every built-in function, in no particular order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        STD_FUNCTIONS.keys().copied()
    }
}

impl Library for StdLibrary {
    fn resolve(&self, name: &str) -> Option<&dyn Function> {
        STD_FUNCTIONS.get(name).map(|f| f as &dyn Function)
    }
}

fn pow(trace: &Trace, args: &[f64]) -> Result<f64> {
    validate(trace, "pow", args).arg_length(2)?;
    Ok(args[0].powf(args[1]))
}

fn round(trace: &Trace, args: &[f64]) -> Result<f64> {
    validate(trace, "round", args).arg_length(2)?;
    let factor = 10f64.powi(args[1] as i32);
    Ok((args[0] * factor).round() / factor)
}

fn min(_: &Trace, args: &[f64]) -> Result<f64> {
    Ok(args.iter().fold(f64::INFINITY, |acc, &x| {
        if acc.is_nan() || x.is_nan() { f64::NAN } else { acc.min(x) }
    }))
}

fn max(_: &Trace, args: &[f64]) -> Result<f64> {
    Ok(args.iter().fold(f64::NEG_INFINITY, |acc, &x| {
        if acc.is_nan() || x.is_nan() { f64::NAN } else { acc.max(x) }
    }))
}

fn sum(_: &Trace, args: &[f64]) -> Result<f64> {
    Ok(args.iter().sum())
}

fn avg(_: &Trace, args: &[f64]) -> Result<f64> {
    Ok(args.iter().sum::<f64>() / args.len() as f64)
}
