//! Evaluator strategies for the expression language.

mod not;
mod path;
mod string;

use petal_dom::{Document, NodeId};
use petal_value::ExpressionResult;

use crate::error::ExpressionError;
use crate::expression::Expression;
use crate::model::EvaluationModel;

pub use not::NotEvaluator;
pub use path::PathEvaluator;
pub use string::StringEvaluator;

/// Everything an evaluator may consult: the document position the
/// expression was found at, and the active evaluation model.
pub struct EvalContext<'a> {
    /// The document being rendered.
    pub document: &'a Document,
    /// The element whose directive is being evaluated.
    pub node: NodeId,
    /// The active scope.
    pub model: &'a EvaluationModel,
}

/// An evaluator strategy, selected by expression prefix.
pub trait EvaluateExpression {
    /// Evaluate `expression` in `ctx`.
    fn evaluate(
        &self,
        expression: &Expression,
        ctx: &EvalContext<'_>,
    ) -> Result<ExpressionResult, ExpressionError>;
}
