//! The string evaluator: literal text with `$`-placeholder interpolation.

use petal_value::{ExpressionResult, Value};

use super::{EvalContext, EvaluateExpression};
use crate::error::ExpressionError;
use crate::expression::Expression;

/// Evaluates `string:` (alias `str:`) expressions.
///
/// Produces a string value and never cancels; interpolation failures
/// bubble up from the nested path evaluation.
#[derive(Default)]
pub struct StringEvaluator;

impl EvaluateExpression for StringEvaluator {
    fn evaluate(
        &self,
        expression: &Expression,
        ctx: &EvalContext<'_>,
    ) -> Result<ExpressionResult, ExpressionError> {
        let content = expression.content();
        let mut out = String::with_capacity(content.len());
        let mut rest = content;

        while let Some(dollar) = rest.find('$') {
            out.push_str(&rest[..dollar]);
            rest = &rest[dollar..];

            let run = rest.chars().take_while(|&c| c == '$').count();
            rest = &rest[run..];

            // Each doubled `$$` escapes to a single literal `$`.
            for _ in 0..run / 2 {
                out.push('$');
            }
            if run % 2 == 0 {
                // Fully escaped: the following text is left untouched.
                continue;
            }

            match take_placeholder(rest) {
                Some((placeholder, consumed)) => {
                    out.push_str(&interpolate(&placeholder, ctx)?);
                    rest = &rest[consumed..];
                }
                None => {
                    // An odd trailing `$` with nothing to interpolate is
                    // kept literally.
                    out.push('$');
                }
            }
        }
        out.push_str(rest);

        Ok(ExpressionResult::Value(Value::string(out)))
    }
}

/// The nested expression a placeholder stands for.
enum Placeholder {
    /// `$name` or `$a/b`: a bare token, always a path expression.
    Bare(String),
    /// `${...}`: arbitrary nested expression text.
    Braced(String),
}

/// Take the placeholder starting at the head of `rest`, returning it and
/// the number of bytes consumed.
fn take_placeholder(rest: &str) -> Option<(Placeholder, usize)> {
    if let Some(body) = rest.strip_prefix('{') {
        let end = body.find('}')?;
        return Some((Placeholder::Braced(body[..end].to_string()), end + 2));
    }
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '/'))
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    Some((Placeholder::Bare(rest[..end].to_string()), end))
}

fn interpolate(placeholder: &Placeholder, ctx: &EvalContext<'_>) -> Result<String, ExpressionError> {
    let nested = match placeholder {
        Placeholder::Bare(token) => Expression::with_prefix("path", token),
        Placeholder::Braced(body) => Expression::parse(body.as_str()),
    };
    let evaluator = ctx.model.registry().get(&nested)?;
    let result = evaluator.evaluate(&nested, ctx)?;
    // A cancelled nested result has nothing to say; render it empty, the
    // same as null.
    Ok(match result {
        ExpressionResult::Cancelled => String::new(),
        ExpressionResult::Value(value) => value.render_string(),
    })
}
