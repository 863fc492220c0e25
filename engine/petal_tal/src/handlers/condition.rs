//! The `condition` directive: conditional element removal.

use petal_dom::Document;
use tracing::trace;

use super::{evaluate_directive, DirectiveHandler};
use crate::context::{HandlingResult, ProcessingContext};
use crate::error::RenderError;
use crate::specs::AttributeSpecs;

/// Evaluates its expression; a false result removes the element (and its
/// subtree) from the tree. A cancelled result keeps the element.
pub struct ConditionHandler;

impl DirectiveHandler for ConditionHandler {
    fn handle(
        &self,
        ctx: ProcessingContext,
        doc: &mut Document,
        specs: &AttributeSpecs,
    ) -> Result<HandlingResult, RenderError> {
        let Some(value) = doc.attribute(ctx.node, specs.condition()) else {
            return Ok(HandlingResult::proceed(ctx));
        };
        let value = value.to_string();

        let result = evaluate_directive(&value, doc, ctx.node, &ctx.model)?;
        if result.is_cancelled() {
            return Ok(HandlingResult::proceed(ctx));
        }

        if result.coerce_to_bool(&value)? {
            Ok(HandlingResult::proceed(ctx))
        } else {
            trace!(node = ctx.node.raw(), "condition removed element");
            doc.detach(ctx.node);
            Ok(HandlingResult::halt())
        }
    }
}
