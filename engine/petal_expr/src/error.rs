//! Error types for expression dispatch and evaluation.

use thiserror::Error;

use petal_value::EvaluationError;

/// The expression prefix names no registered evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised expression type '{prefix}'")]
pub struct UnrecognizedExpressionTypeError {
    /// The prefix that failed to dispatch.
    pub prefix: String,
}

/// Any failure raised while dispatching or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    /// The expression was dispatched but could not be evaluated.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    /// The expression prefix names no registered evaluator.
    #[error(transparent)]
    UnrecognizedExpressionType(#[from] UnrecognizedExpressionTypeError),
}
