//! Compile-and-evaluate front door.
//!
//! [`FormulaEngine`] bundles the lexer, the grammar, a function library and
//! the comparison tolerance. It holds no per-call state, so one engine can
//! serve any number of threads; compiled trees are plain values that can be
//! cached and evaluated repeatedly against different variables.

use super::evaluator::Evaluator;
use super::grammar::{Entry, FormulaGrammar};
use super::lexer::FormulaLexer;
use super::library::Library;
use super::stdlib::StdLibrary;
use super::variables::Variables;
use crate::common::{ErrorKind, Result};
use crate::descent::{Lexer, ParseTree, Token, compile};
use log::debug;
use std::fmt;
use std::sync::Arc;

/// Engine settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Tolerance for `==`, `!=`, `<=` and `>=`. Zero means exact.
    pub epsilon: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig { epsilon: 0.0 }
    }
}

impl EngineConfig {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }
}

/// Compiles formula text and evaluates the resulting trees.
///
/// ```
/// use formulang::{FormulaEngine, Variables};
///
/// let engine = FormulaEngine::default();
/// let tree = engine.compile("[x] * 2 + 1").unwrap();
/// assert_eq!(engine.evaluate(&tree, &Variables::from([("x", 4.0)])).unwrap(), 9.0);
/// assert_eq!(engine.evaluate(&tree, &Variables::from([("x", 0.5)])).unwrap(), 2.0);
/// ```
#[derive(Clone)]
pub struct FormulaEngine {
    config: EngineConfig,
    lexer: FormulaLexer,
    library: Arc<dyn Library>,
}

impl FormulaEngine {
    /// Engine over the standard library.
    pub fn new(config: EngineConfig) -> Self {
        FormulaEngine {
            config,
            lexer: FormulaLexer::new(),
            library: Arc::new(StdLibrary),
        }
    }

    /// Replace the function library.
    pub fn with_library(mut self, library: Arc<dyn Library>) -> Self {
        self.library = library;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn library(&self) -> &dyn Library {
        self.library.as_ref()
    }

    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>> {
        self.lexer.lex(input)
    }

    /// Compile a numeric formula.
    ///
    /// Text that is not an `Expr` is retried as an unparenthesised
    /// conditional, so `1<2?10:20` compiles too. When both fail the error
    /// from the `Expr` attempt is returned.
    pub fn compile(&self, input: &str) -> Result<ParseTree> {
        let tokens = self.tokenize(input)?;
        match compile(tokens.clone(), &FormulaGrammar::new()) {
            Ok(tree) => {
                debug!("compiled {:?} as {:?}", input, Entry::Expression);
                Ok(tree)
            },
            Err(err) if err.kind() == ErrorKind::Syntax => {
                let tree = compile(tokens, &FormulaGrammar::with_entry(Entry::Conditional))
                    .map_err(|_| err)?;
                debug!("compiled {:?} as {:?}", input, Entry::Conditional);
                Ok(tree)
            },
            Err(err) => Err(err),
        }
    }

    /// Compile a bare boolean condition such as `(1==1)&&(2==2)`.
    pub fn compile_condition(&self, input: &str) -> Result<ParseTree> {
        self.compile_from(input, Entry::Condition)
    }

    fn compile_from(&self, input: &str, entry: Entry) -> Result<ParseTree> {
        let tokens = self.tokenize(input)?;
        let tree = compile(tokens, &FormulaGrammar::with_entry(entry))?;
        debug!("compiled {:?} as {:?}", input, entry);
        Ok(tree)
    }

    fn evaluator<'a>(&'a self, variables: &'a Variables) -> Evaluator<'a> {
        Evaluator::new(self.library.as_ref(), variables).with_epsilon(self.config.epsilon)
    }

    /// Evaluate a tree produced by [`compile`](Self::compile).
    pub fn evaluate(&self, tree: &ParseTree, variables: &Variables) -> Result<f64> {
        self.evaluator(variables).evaluate(tree)
    }

    /// Evaluate a tree produced by [`compile_condition`](Self::compile_condition).
    pub fn evaluate_condition(&self, tree: &ParseTree, variables: &Variables) -> Result<bool> {
        self.evaluator(variables).evaluate_condition(tree)
    }

    /// Compile and evaluate in one step.
    pub fn eval(&self, input: &str, variables: &Variables) -> Result<f64> {
        self.evaluate(&self.compile(input)?, variables)
    }

    pub fn eval_condition(&self, input: &str, variables: &Variables) -> Result<bool> {
        self.evaluate_condition(&self.compile_condition(input)?, variables)
    }
}

impl Default for FormulaEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl fmt::Debug for FormulaEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormulaEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descent::Trace;
    use crate::formula::symbol::BOOL_COND;
    use crate::formula::FunctionLibrary;

    #[test]
    fn test_eval() {
        let engine = FormulaEngine::default();
        let vars = Variables::new();
        assert_eq!(engine.eval("1-2-3", &vars).unwrap(), 2.0);
        assert_eq!(engine.eval(" max( 1 , 5 , 3 ) ", &vars).unwrap(), 5.0);
        assert_eq!(engine.eval("POW(2, 10)", &vars).unwrap(), 1024.0);
    }

    #[test]
    fn test_error_kinds() {
        let engine = FormulaEngine::default();
        let vars = Variables::new();
        assert_eq!(engine.eval("1 $ 2", &vars).unwrap_err().kind(), ErrorKind::Lexical);
        assert_eq!(engine.eval("not(1==1)", &vars).unwrap_err().kind(), ErrorKind::Syntax);
        assert_eq!(engine.eval("pow(2)", &vars).unwrap_err().kind(), ErrorKind::Evaluation);
        assert_eq!(engine.eval("foo(1)", &vars).unwrap_err().kind(), ErrorKind::Evaluation);
        assert_eq!(engine.eval("[nope]", &vars).unwrap_err().kind(), ErrorKind::Evaluation);
    }

    #[test]
    fn test_epsilon_config() {
        let vars = Variables::new();
        let exact = FormulaEngine::default();
        let loose = FormulaEngine::new(EngineConfig::default().with_epsilon(0.01));
        assert_eq!(exact.eval("(0.1==0.105?1:0)", &vars).unwrap(), 0.0);
        assert_eq!(loose.eval("(0.1==0.105?1:0)", &vars).unwrap(), 1.0);
        assert_eq!(loose.config().epsilon, 0.01);
    }

    #[test]
    fn test_condition_entry() {
        let engine = FormulaEngine::default();
        let vars = Variables::new();
        assert!(engine.eval_condition("(1==1)&&(2==2)", &vars).unwrap());
        assert!(!engine.eval_condition("1>2 or 2>3", &vars).unwrap());
        // a bare condition is not a numeric formula
        assert_eq!(engine.compile("(1==1)&&(2==2)").unwrap_err().kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_unparenthesised_conditional() {
        let engine = FormulaEngine::default();
        let vars = Variables::new();
        assert_eq!(engine.eval("1<2?10:20", &vars).unwrap(), 10.0);
        assert_eq!(engine.eval("1>2?10:20", &vars).unwrap(), 20.0);
        // the untaken branch is never evaluated
        assert_eq!(engine.eval("1==1?1:[x]", &vars).unwrap(), 1.0);

        let tree = engine.compile("[x] >= 0 ? [x] : -[x]").unwrap();
        assert!(tree.is_non_terminal_of(BOOL_COND));
        assert_eq!(engine.evaluate(&tree, &Variables::from([("x", -4.0)])).unwrap(), 4.0);

        // when neither reading matches, the error comes from the Expr attempt
        let err = engine.compile("1 + * 2").unwrap_err();
        assert_eq!(
            err,
            crate::common::Error::Syntax {
                near: "+".to_string(),
                offset: Some(2),
            }
        );
    }

    #[test]
    fn test_compiled_tree_is_reusable() {
        let engine = FormulaEngine::default();
        let tree = engine.compile("([x] > 0 ? [x] : -[x])").unwrap();
        assert_eq!(engine.evaluate(&tree, &Variables::from([("x", -3.0)])).unwrap(), 3.0);
        assert_eq!(engine.evaluate(&tree, &Variables::from([("x", 2.0)])).unwrap(), 2.0);
    }

    #[test]
    fn test_with_library() {
        let lib = FunctionLibrary::new().with_function("max", |_: &Trace, _: &[f64]| Ok(42.0));
        let engine = FormulaEngine::default().with_library(Arc::new(lib));
        let vars = Variables::new();
        assert_eq!(engine.eval("max(1,2)", &vars).unwrap(), 42.0);
        assert_eq!(engine.eval("min(1,2)", &vars).unwrap(), 1.0);
        assert!(engine.library().resolve("sum").is_some());
    }

    #[test]
    fn test_engine_is_shareable() {
        let engine = Arc::new(FormulaEngine::default());
        let tree = Arc::new(engine.compile("sum(1,2,3) * [k]").unwrap());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let engine = Arc::clone(&engine);
                let tree = Arc::clone(&tree);
                std::thread::spawn(move || {
                    engine
                        .evaluate(&tree, &Variables::from([("k", i as f64)]))
                        .unwrap()
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), 6.0 * i as f64);
        }
    }
}
