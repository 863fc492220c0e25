//! Error types for directive interpretation.

use thiserror::Error;

use petal_dom::MarkupError;
use petal_expr::{ExpressionError, UnrecognizedExpressionTypeError};
use petal_value::EvaluationError;

/// A directive attribute value does not conform to its grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid '{attribute}' directive on <{element}> (value: '{value}'): {detail}")]
pub struct DirectiveParseError {
    /// Name of the element carrying the directive.
    pub element: String,
    /// Name of the directive attribute.
    pub attribute: String,
    /// The raw attribute value.
    pub value: String,
    /// What was wrong with it.
    pub detail: String,
}

/// Any failure raised while rendering a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// An expression could not be evaluated.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    /// An expression prefix named no registered evaluator.
    #[error(transparent)]
    UnrecognizedExpressionType(#[from] UnrecognizedExpressionTypeError),
    /// A directive attribute value was malformed.
    #[error(transparent)]
    DirectiveParse(#[from] DirectiveParseError),
    /// A `structure` value could not be parsed as markup.
    #[error(transparent)]
    Markup(#[from] MarkupError),
    /// The render was cancelled cooperatively.
    #[error("rendering was cancelled")]
    Cancelled,
}

impl From<ExpressionError> for RenderError {
    fn from(error: ExpressionError) -> Self {
        match error {
            ExpressionError::Evaluation(e) => RenderError::Evaluation(e),
            ExpressionError::UnrecognizedExpressionType(e) => {
                RenderError::UnrecognizedExpressionType(e)
            }
        }
    }
}
