//! Petal Expr - The embedded expression language of the petal engine.
//!
//! Expressions are short, read-only programs found in directive attribute
//! values: path lookups with pipe-separated fallback alternatives
//! (`user/name | default`), string interpolation (`string:Hello $name`),
//! and boolean negation (`not:user/active`).
//!
//! # Architecture
//!
//! - `Expression`: a raw attribute value split into prefix and content
//! - `path`: the path grammar (alternates of segments) and its walker
//! - `eval`: the three evaluator strategies (path, string, not)
//! - `EvaluatorRegistry`: prefix string -> evaluator strategy
//! - `EvaluationModel`: variable scoping, repetitions, recorded errors
//!
//! The entry point is [`evaluate`], which parses, dispatches through the
//! registry, and runs the selected evaluator.

mod error;
pub mod eval;
mod expression;
mod model;
mod ordinal;
pub mod path;
mod registry;
mod repetition;

pub use error::{ExpressionError, UnrecognizedExpressionTypeError};
pub use eval::{EvalContext, EvaluateExpression};
pub use expression::Expression;
pub use model::{EvaluationModel, RecordedError, SharedScope};
pub use ordinal::{alphabetic_value, roman_numeral};
pub use path::{Path, PathWalker, Segment};
pub use registry::EvaluatorRegistry;
pub use repetition::RepetitionInfo;

// Re-export the value-layer types evaluators traffic in.
pub use petal_value::{EvaluationError, ExpressionResult, Value};

use petal_dom::{Document, NodeId};

/// Evaluate raw expression text against a document position and model.
///
/// This is the expression-language entry point: it parses the text into an
/// [`Expression`], selects the evaluator for its prefix (defaulting to the
/// path evaluator), and runs it.
pub fn evaluate(
    text: &str,
    document: &Document,
    node: NodeId,
    model: &EvaluationModel,
) -> Result<ExpressionResult, ExpressionError> {
    let expression = Expression::parse(text);
    let evaluator = model.registry().get(&expression)?;
    let ctx = EvalContext {
        document,
        node,
        model,
    };
    evaluator.evaluate(&expression, &ctx)
}
