//! Evaluation error types shared by the expression evaluators.
//!
//! Every evaluation failure carries the text of the expression that was
//! being evaluated. Construction goes through the factory functions
//! (`no_such_value`, `not_iterable`, ...) so call sites stay terse.

use std::fmt;

use thiserror::Error;

/// An expression could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to evaluate expression '{expression}': {kind}")]
pub struct EvaluationError {
    /// The raw text of the expression which failed.
    pub expression: String,
    /// What went wrong.
    pub kind: EvaluationErrorKind,
}

/// Typed category of evaluation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationErrorKind {
    /// The expression text is not a well-formed path.
    CannotParsePath { detail: String },
    /// Every pipe alternative was exhausted without resolving.
    NoSuchValue,
    /// A cancelled result was dereferenced as a value.
    CancelledValue,
    /// A sequence was required but the value is not iterable.
    NotIterable { type_name: &'static str },
}

impl fmt::Display for EvaluationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationErrorKind::CannotParsePath { detail } => {
                write!(f, "cannot parse path ({detail})")
            }
            EvaluationErrorKind::NoSuchValue => {
                write!(f, "no alternative resolved to a value")
            }
            EvaluationErrorKind::CancelledValue => {
                write!(f, "a cancelled result cannot be used as a value")
            }
            EvaluationErrorKind::NotIterable { type_name } => {
                write!(f, "a value of type {type_name} is not an iterable sequence")
            }
        }
    }
}

/// The expression text is not a well-formed path.
pub fn cannot_parse_path(expression: impl Into<String>, detail: impl Into<String>) -> EvaluationError {
    EvaluationError {
        expression: expression.into(),
        kind: EvaluationErrorKind::CannotParsePath {
            detail: detail.into(),
        },
    }
}

/// Every pipe alternative was exhausted without resolving.
pub fn no_such_value(expression: impl Into<String>) -> EvaluationError {
    EvaluationError {
        expression: expression.into(),
        kind: EvaluationErrorKind::NoSuchValue,
    }
}

/// A cancelled result was dereferenced as a value.
pub fn cancelled_value(expression: impl Into<String>) -> EvaluationError {
    EvaluationError {
        expression: expression.into(),
        kind: EvaluationErrorKind::CancelledValue,
    }
}

/// A sequence was required but the value is not iterable.
pub fn not_iterable(expression: impl Into<String>, type_name: &'static str) -> EvaluationError {
    EvaluationError {
        expression: expression.into(),
        kind: EvaluationErrorKind::NotIterable { type_name },
    }
}
