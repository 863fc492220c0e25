//! The path evaluator: alternative-by-alternative resolution with
//! short-circuit cancellation.

use petal_value::{cannot_parse_path, no_such_value, traverse, ExpressionResult, Value};
use rustc_hash::FxHashMap;

use super::{EvalContext, EvaluateExpression};
use crate::error::ExpressionError;
use crate::expression::Expression;
use crate::path::{Path, PathWalker, Segment};

/// Evaluates `path:` expressions (and unprefixed expressions, which default
/// to this evaluator).
#[derive(Default)]
pub struct PathEvaluator;

impl EvaluateExpression for PathEvaluator {
    fn evaluate(
        &self,
        expression: &Expression,
        ctx: &EvalContext<'_>,
    ) -> Result<ExpressionResult, ExpressionError> {
        let path = Path::parse(expression.content())
            .map_err(|e| cannot_parse_path(expression.text(), e.detail))?;

        let mut walker = PathWalker::new(&path);
        loop {
            match resolve_alternate(&mut walker, ctx) {
                Some(result) => return Ok(result),
                None => {
                    if !walker.advance_alternate() {
                        // Only exhaustion of every alternate is an error;
                        // individual resolution failures are not.
                        return Err(no_such_value(expression.text()).into());
                    }
                }
            }
        }
    }
}

/// Resolve the alternate the walker currently points at.
///
/// `None` means this alternate failed and the caller should try the next
/// one. Cancellation short-circuits: the first intermediate equal to the
/// cancellation marker makes the whole expression `Cancelled`.
fn resolve_alternate(
    walker: &mut PathWalker<'_>,
    ctx: &EvalContext<'_>,
) -> Option<ExpressionResult> {
    let root = walker.current_segment()?;
    let root_name = segment_name(root, ctx)?;
    let mut current = resolve_root(&root_name, ctx)?;

    while walker.advance_segment() {
        if current.is_cancellation() {
            return Some(ExpressionResult::Cancelled);
        }
        let segment = walker.current_segment()?;
        let name = segment_name(segment, ctx)?;
        current = traverse(&current, &name)?;
    }

    if current.is_cancellation() {
        return Some(ExpressionResult::Cancelled);
    }
    Some(ExpressionResult::Value(current))
}

/// The runtime name of a segment: its literal name, or (when
/// interpolated) the rendered value of the named variable.
fn segment_name(segment: &Segment, ctx: &EvalContext<'_>) -> Option<String> {
    if !segment.is_interpolated() {
        return Some(segment.name().to_string());
    }
    let value = lookup_name(segment.name(), ctx)?;
    Some(value.render_string())
}

/// Resolve a root name against the model.
///
/// `CONTEXTS` is reserved and always resolves to the built-in namespace
/// container; otherwise user definitions (locals, then globals) shadow the
/// built-in roots.
fn resolve_root(name: &str, ctx: &EvalContext<'_>) -> Option<Value> {
    if name == "CONTEXTS" {
        return Some(builtin_container(ctx));
    }
    lookup_name(name, ctx)
}

fn lookup_name(name: &str, ctx: &EvalContext<'_>) -> Option<Value> {
    ctx.model.lookup(name).or_else(|| builtin_root(name, ctx))
}

/// The built-in roots inherent to the expression language.
fn builtin_root(name: &str, ctx: &EvalContext<'_>) -> Option<Value> {
    match name {
        "here" => Some(ctx.model.here().clone()),
        "nothing" => Some(Value::Null),
        "default" => Some(Value::Cancellation),
        "options" => Some(Value::Map(ctx.model.options())),
        "repeat" => Some(ctx.model.repeat_container()),
        "attrs" => Some(attributes_container(ctx)),
        _ => None,
    }
}

/// The `CONTEXTS` container: every built-in root by name, immune to
/// shadowing by user definitions.
fn builtin_container(ctx: &EvalContext<'_>) -> Value {
    let mut entries = FxHashMap::default();
    for name in ["here", "nothing", "default", "options", "repeat", "attrs"] {
        if let Some(value) = builtin_root(name, ctx) {
            entries.insert(name.to_string(), value);
        }
    }
    Value::map(entries)
}

/// The `attrs` container: the current element's attribute values by name.
fn attributes_container(ctx: &EvalContext<'_>) -> Value {
    let mut entries = FxHashMap::default();
    if let Some(element) = ctx.document.element(ctx.node) {
        for attribute in &element.attributes {
            entries.insert(
                attribute.name.to_string(),
                Value::string(attribute.value.as_str()),
            );
        }
    }
    Value::map(entries)
}
