//! Unified error types for the formula compiler and evaluator.
//!
//! Compiling and evaluating a formula fails in one of four ways: lexical,
//! syntax, evaluation, or internal. Loading test-case files adds I/O.
//! Callers classify failures through [`Error::kind`] instead of matching on
//! message text.
use thiserror::Error;

/// Main error type for formulang operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Input text is not part of the token language
    #[error("lexical error - {message} at offset {offset}")]
    Lexical { message: String, offset: usize },

    /// The grammar could not derive a tree covering the whole token stream
    #[error("compile error - {}", syntax_message(.near))]
    Syntax {
        /// Lexeme of the last successfully matched token (empty if none).
        near: String,
        /// Byte offset of that token in the source, when known.
        offset: Option<usize>,
    },

    /// A well-formed formula failed while being evaluated
    #[error("parse error - {error} (stacktrace = {trace})")]
    Evaluation {
        error: EvaluationError,
        /// Rendered trace of the productions active at the failure point.
        trace: String,
    },

    /// Tree shape did not match what the evaluator expects; indicates a defect
    #[error("runtime error - {0}")]
    Internal(String),

    /// Reading a test-case file failed
    #[error("IO error: {0}")]
    Io(String),
}

fn syntax_message(near: &str) -> String {
    if near.is_empty() {
        "invalid syntax at start of input".to_string()
    } else {
        format!("invalid syntax near token `{}`", near)
    }
}

/// Causes of an [`Error::Evaluation`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("unrecognized function `{0}`")]
    UnrecognizedFunction(String),

    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    #[error("[{function}] - expected {expected} arguments, got {got} instead")]
    ArgumentCount {
        function: String,
        expected: usize,
        got: usize,
    },

    #[error("[{function}] - expected at least {expected} arguments, got {got} instead")]
    MinArgumentCount {
        function: String,
        expected: usize,
        got: usize,
    },

    #[error("invalid logical op `{0}`")]
    InvalidOperator(String),

    /// Free-form failure raised by a library function
    #[error("[{function}] - {message}")]
    Function { function: String, message: String },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Evaluation,
    Internal,
    Io,
}

impl Error {
    /// Build an evaluation error carrying a rendered trace.
    pub fn evaluation(error: EvaluationError, trace: impl Into<String>) -> Self {
        Error::Evaluation {
            error,
            trace: trace.into(),
        }
    }

    /// Build an internal (tree-shape) error.
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Lexical { .. } => ErrorKind::Lexical,
            Error::Syntax { .. } => ErrorKind::Syntax,
            Error::Evaluation { .. } => ErrorKind::Evaluation,
            Error::Internal(_) => ErrorKind::Internal,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// True for failures raised before a tree exists (lexing and compiling).
    pub fn is_compile_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::Lexical | ErrorKind::Syntax)
    }

    /// True for user-facing failures raised while evaluating a tree.
    pub fn is_parse_error(&self) -> bool {
        self.kind() == ErrorKind::Evaluation
    }
}

/// Result type for formulang operations.
pub type Result<T> = std::result::Result<T, Error>;
