//! Function libraries and the argument validator used by library functions.
//!
//! A [`Library`] maps a function name to something callable. Resolution
//! chains: a [`FunctionLibrary`] answers from its own registrations first and
//! falls back to another library (the standard library unless told
//! otherwise). Libraries are immutable once built and can be shared across
//! threads; per-call overrides are expressed by building a new layered
//! library rather than mutating a shared one.

use super::stdlib::StdLibrary;
use crate::common::{Error, EvaluationError, Result};
use crate::descent::Trace;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A callable formula function.
///
/// Receives the trace at the call site (for diagnostics) and the evaluated
/// arguments, left to right.
pub trait Function: Send + Sync {
    fn call(&self, trace: &Trace, args: &[f64]) -> Result<f64>;
}

impl<F> Function for F
where
    F: Fn(&Trace, &[f64]) -> Result<f64> + Send + Sync,
{
    #[inline]
    fn call(&self, trace: &Trace, args: &[f64]) -> Result<f64> {
        self(trace, args)
    }
}

/// Name-to-function resolution.
pub trait Library: Send + Sync {
    fn resolve(&self, name: &str) -> Option<&dyn Function>;
}

/// Caller-registered functions layered over a fallback library.
pub struct FunctionLibrary {
    functions: HashMap<String, Box<dyn Function>>,
    fallback: Option<Arc<dyn Library>>,
}

impl FunctionLibrary {
    /// Empty library falling back to the standard library.
    pub fn new() -> Self {
        Self::with_fallback(Arc::new(StdLibrary))
    }

    /// Library that resolves only what is registered on it.
    pub fn without_fallback() -> Self {
        FunctionLibrary {
            functions: HashMap::new(),
            fallback: None,
        }
    }

    pub fn with_fallback(fallback: Arc<dyn Library>) -> Self {
        FunctionLibrary {
            functions: HashMap::new(),
            fallback: Some(fallback),
        }
    }

    /// Register `function` under `name`, replacing any earlier registration.
    ///
    /// Names are stored lower-cased, matching the lexer's case folding.
    pub fn register<F>(&mut self, name: impl AsRef<str>, function: F) -> &mut Self
    where
        F: Fn(&Trace, &[f64]) -> Result<f64> + Send + Sync + 'static,
    {
        self.functions
            .insert(name.as_ref().to_lowercase(), Box::new(function));
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_function<F>(mut self, name: impl AsRef<str>, function: F) -> Self
    where
        F: Fn(&Trace, &[f64]) -> Result<f64> + Send + Sync + 'static,
    {
        self.register(name, function);
        self
    }

    /// True when `name` is registered directly on this library.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Default for FunctionLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FunctionLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.functions.keys().collect();
        names.sort();
        f.debug_struct("FunctionLibrary")
            .field("functions", &names)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

impl Library for FunctionLibrary {
    fn resolve(&self, name: &str) -> Option<&dyn Function> {
        match self.functions.get(name) {
            Some(function) => Some(&**function),
            None => self.fallback.as_ref().and_then(|lib| lib.resolve(name)),
        }
    }
}

/// Argument checks for library functions.
///
/// ```
/// use formulang::descent::Trace;
/// use formulang::formula::validate;
///
/// let trace = Trace::new();
/// assert!(validate(&trace, "pow", &[2.0, 3.0]).arg_length(2).is_ok());
/// assert!(validate(&trace, "pow", &[2.0]).arg_length(2).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    trace: &'a Trace,
    function: &'a str,
    args: &'a [f64],
}

pub fn validate<'a>(trace: &'a Trace, function: &'a str, args: &'a [f64]) -> Validator<'a> {
    Validator {
        trace,
        function,
        args,
    }
}

impl<'a> Validator<'a> {
    pub fn args(&self) -> &'a [f64] {
        self.args
    }

    /// An evaluation error attributed to this function.
    pub fn error(&self, message: impl Into<String>) -> Error {
        self.fail(EvaluationError::Function {
            function: self.function.to_string(),
            message: message.into(),
        })
    }

    /// Run a custom check.
    pub fn rule<F>(&self, check: F) -> Result<&Self>
    where
        F: FnOnce(&Self) -> Result<()>,
    {
        check(self)?;
        Ok(self)
    }

    /// Require exactly `n` arguments.
    pub fn arg_length(&self, n: usize) -> Result<&Self> {
        if self.args.len() != n {
            return Err(self.fail(EvaluationError::ArgumentCount {
                function: self.function.to_string(),
                expected: n,
                got: self.args.len(),
            }));
        }
        Ok(self)
    }

    /// Require at least `n` arguments.
    pub fn arg_min_length(&self, n: usize) -> Result<&Self> {
        if self.args.len() < n {
            return Err(self.fail(EvaluationError::MinArgumentCount {
                function: self.function.to_string(),
                expected: n,
                got: self.args.len(),
            }));
        }
        Ok(self)
    }

    fn fail(&self, error: EvaluationError) -> Error {
        Error::evaluation(error, self.trace.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorKind;

    fn call(lib: &dyn Library, name: &str, args: &[f64]) -> Option<Result<f64>> {
        lib.resolve(name).map(|f| f.call(&Trace::new(), args))
    }

    #[test]
    fn test_custom_functions_shadow_fallback() {
        let lib = FunctionLibrary::new()
            .with_function("double", |_: &Trace, args: &[f64]| Ok(args.iter().sum::<f64>() * 2.0))
            .with_function("sum", |_: &Trace, _: &[f64]| Ok(-1.0));

        assert_eq!(call(&lib, "double", &[2.0, 3.0]).unwrap().unwrap(), 10.0);
        assert_eq!(call(&lib, "sum", &[2.0, 3.0]).unwrap().unwrap(), -1.0);
        // not registered here: answered by the standard library
        assert_eq!(call(&lib, "max", &[2.0, 3.0]).unwrap().unwrap(), 3.0);
        assert!(lib.resolve("nope").is_none());
    }

    #[test]
    fn test_without_fallback() {
        let mut lib = FunctionLibrary::without_fallback();
        assert!(lib.resolve("pow").is_none());
        lib.register("ONE", |_: &Trace, _: &[f64]| Ok(1.0));
        assert!(lib.contains("one"));
        assert_eq!(lib.len(), 1);
        assert_eq!(call(&lib, "one", &[]).unwrap().unwrap(), 1.0);
    }

    #[test]
    fn test_layered_over_custom_library() {
        let base: Arc<dyn Library> =
            Arc::new(FunctionLibrary::without_fallback().with_function("k", |_: &Trace, _: &[f64]| Ok(7.0)));
        let lib = FunctionLibrary::with_fallback(base);
        assert_eq!(call(&lib, "k", &[]).unwrap().unwrap(), 7.0);
        assert!(lib.resolve("pow").is_none());
    }

    #[test]
    fn test_validator_messages() {
        let trace = Trace::new()
            .push(crate::formula::symbol::EXPR)
            .push(crate::formula::symbol::FUNC_CALL);

        let err = validate(&trace, "pow", &[1.0]).arg_length(2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Evaluation);
        assert_eq!(
            err.to_string(),
            "parse error - [pow] - expected 2 arguments, got 1 instead (stacktrace = Expr > FuncCall)"
        );

        let err = validate(&trace, "pick", &[]).arg_min_length(1).unwrap_err();
        assert!(err.to_string().contains("expected at least 1 arguments, got 0 instead"));

        let err = validate(&trace, "sqrt", &[-1.0])
            .rule(|v| {
                if v.args()[0] < 0.0 {
                    return Err(v.error("negative input"));
                }
                Ok(())
            })
            .unwrap_err();
        assert!(err.to_string().starts_with("parse error - [sqrt] - negative input"));
    }
}
