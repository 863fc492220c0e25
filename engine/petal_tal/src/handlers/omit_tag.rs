//! The `omit-tag` directive: tag flattening.

use petal_dom::Document;
use tracing::trace;

use super::{evaluate_directive, DirectiveHandler};
use crate::context::{HandlingResult, ProcessingContext};
use crate::error::RenderError;
use crate::specs::AttributeSpecs;

/// Flattens an element, replacing it with its children.
///
/// An element residing in the directive namespace itself (a structural
/// element such as `<tal:block>`) is flattened unconditionally, regardless
/// of any other attribute state. Otherwise an omit-tag attribute decides:
/// an empty value always omits; a cancelled expression keeps the tag.
pub struct OmitTagHandler;

impl DirectiveHandler for OmitTagHandler {
    fn handle(
        &self,
        ctx: ProcessingContext,
        doc: &mut Document,
        specs: &AttributeSpecs,
    ) -> Result<HandlingResult, RenderError> {
        if doc.is_element_in_namespace(ctx.node, specs.prefix()) {
            return Ok(flatten(ctx, doc));
        }

        let Some(value) = doc.attribute(ctx.node, specs.omit_tag()) else {
            return Ok(HandlingResult::proceed(ctx));
        };
        let value = value.to_string();

        let should_omit = if value.trim().is_empty() {
            true
        } else {
            let result = evaluate_directive(&value, doc, ctx.node, &ctx.model)?;
            if result.is_cancelled() {
                false
            } else {
                result.coerce_to_bool(&value)?
            }
        };

        if should_omit {
            Ok(flatten(ctx, doc))
        } else {
            Ok(HandlingResult::proceed(ctx))
        }
    }
}

fn flatten(ctx: ProcessingContext, doc: &mut Document) -> HandlingResult {
    if doc.parent(ctx.node).is_none() {
        // The root cannot be flattened away; keep it.
        return HandlingResult::proceed(ctx);
    }
    trace!(node = ctx.node.raw(), "omitting tag");
    let children = doc.flatten(ctx.node);
    let exposed = children
        .into_iter()
        .map(|child| ProcessingContext {
            node: child,
            model: ctx.model.create_child(),
            handlers: ctx.handlers.clone(),
        })
        .collect();
    HandlingResult::expose(exposed)
}
