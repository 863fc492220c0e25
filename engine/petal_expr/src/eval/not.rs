//! The negation evaluator.

use petal_value::{ExpressionResult, Value};

use super::{EvalContext, EvaluateExpression};
use crate::error::ExpressionError;
use crate::expression::Expression;

/// Evaluates `not:` expressions: the operand is dispatched through the
/// registry and the result is the boolean negation of its truthiness.
///
/// A cancelled operand negates to `true`. That is observable behavior,
/// fixed; see the negation table in the crate tests.
#[derive(Default)]
pub struct NotEvaluator;

impl EvaluateExpression for NotEvaluator {
    fn evaluate(
        &self,
        expression: &Expression,
        ctx: &EvalContext<'_>,
    ) -> Result<ExpressionResult, ExpressionError> {
        let operand = Expression::parse(expression.content());
        let evaluator = ctx.model.registry().get(&operand)?;
        let negated = match evaluator.evaluate(&operand, ctx)? {
            ExpressionResult::Cancelled => true,
            ExpressionResult::Value(value) => !value.is_truthy(),
        };
        Ok(ExpressionResult::Value(Value::Bool(negated)))
    }
}
