//! The tagged outcome of evaluating an expression.

use std::rc::Rc;

use crate::error::{cancelled_value, not_iterable, EvaluationError};
use crate::value::Value;

/// Outcome of evaluating an expression: either an explicit signal to leave
/// the target unchanged, or a value (possibly null).
///
/// A cancelled result must never be dereferenced as a value; the coercion
/// helpers enforce this by failing with an [`EvaluationError`] carrying the
/// expression text.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionResult {
    /// The evaluation explicitly signals "leave the target unchanged".
    Cancelled,
    /// An ordinary value.
    Value(Value),
}

impl ExpressionResult {
    /// `true` if this result cancels the surrounding action.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ExpressionResult::Cancelled)
    }

    /// Borrow the value, failing if the result was cancelled.
    pub fn expect_value(&self, expression: &str) -> Result<&Value, EvaluationError> {
        match self {
            ExpressionResult::Cancelled => Err(cancelled_value(expression)),
            ExpressionResult::Value(value) => Ok(value),
        }
    }

    /// Take the value, failing if the result was cancelled.
    pub fn into_value(self, expression: &str) -> Result<Value, EvaluationError> {
        match self {
            ExpressionResult::Cancelled => Err(cancelled_value(expression)),
            ExpressionResult::Value(value) => Ok(value),
        }
    }

    /// Coerce the value to a boolean using standard truthiness.
    pub fn coerce_to_bool(&self, expression: &str) -> Result<bool, EvaluationError> {
        self.expect_value(expression).map(Value::is_truthy)
    }

    /// Coerce the value to its rendered string form.
    pub fn coerce_to_string(&self, expression: &str) -> Result<String, EvaluationError> {
        self.expect_value(expression).map(Value::render_string)
    }

    /// Coerce the value to an iterable sequence.
    pub fn coerce_to_sequence(
        &self,
        expression: &str,
    ) -> Result<Rc<Vec<Value>>, EvaluationError> {
        match self.expect_value(expression)? {
            Value::List(items) => Ok(Rc::clone(items)),
            other => Err(not_iterable(expression, other.type_name())),
        }
    }
}

impl From<Value> for ExpressionResult {
    fn from(value: Value) -> Self {
        ExpressionResult::Value(value)
    }
}
