//! The `attributes` directive: computed attribute values.

use petal_dom::Document;
use petal_value::{ExpressionResult, Value};
use tracing::trace;

use super::{directive_error, evaluate_directive, DirectiveHandler};
use crate::context::{HandlingResult, ProcessingContext};
use crate::error::RenderError;
use crate::grammar;
use crate::specs::AttributeSpecs;

/// Parses `;`-separated `[prefix:]name expression` pairs. A cancelled
/// entry is skipped, null removes the named attribute, and any other
/// value sets the attribute to its string form. Always continues the
/// pipeline.
pub struct AttributesHandler;

impl DirectiveHandler for AttributesHandler {
    fn handle(
        &self,
        ctx: ProcessingContext,
        doc: &mut Document,
        specs: &AttributeSpecs,
    ) -> Result<HandlingResult, RenderError> {
        let Some(value) = doc.attribute(ctx.node, specs.attributes()) else {
            return Ok(HandlingResult::proceed(ctx));
        };
        let value = value.to_string();

        let assignments = grammar::parse_attribute_assignments(&value)
            .map_err(|detail| directive_error(doc, ctx.node, specs.attributes(), &value, detail))?;

        for assignment in assignments {
            let result = evaluate_directive(&assignment.expression, doc, ctx.node, &ctx.model)?;
            match result {
                ExpressionResult::Cancelled => {}
                ExpressionResult::Value(Value::Null) => {
                    doc.remove_attribute(ctx.node, &assignment.name);
                }
                ExpressionResult::Value(resolved) => {
                    trace!(name = %assignment.name, "computed attribute");
                    doc.set_attribute(ctx.node, assignment.name, resolved.render_string());
                }
            }
        }

        Ok(HandlingResult::proceed(ctx))
    }
}
