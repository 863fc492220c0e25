//! The `content` and `replace` directives: value substitution.

use petal_dom::Document;
use petal_value::Value;
use tracing::trace;

use super::{directive_error, evaluate_directive, render_value_nodes, DirectiveHandler};
use crate::context::{HandlingResult, ProcessingContext};
use crate::error::RenderError;
use crate::grammar;
use crate::specs::AttributeSpecs;

/// Handles both `content` and `replace`: their value grammars are
/// identical (`[text|structure] expression`) and they may not coexist on
/// one element.
///
/// `content` substitutes the element's children; `replace` substitutes
/// the element itself, splicing the rendered node(s) into its position.
pub struct ContentOrReplaceHandler;

impl DirectiveHandler for ContentOrReplaceHandler {
    fn handle(
        &self,
        ctx: ProcessingContext,
        doc: &mut Document,
        specs: &AttributeSpecs,
    ) -> Result<HandlingResult, RenderError> {
        let content = doc.attribute(ctx.node, specs.content()).map(str::to_string);
        let replace = doc.attribute(ctx.node, specs.replace()).map(str::to_string);

        match (content, replace) {
            (Some(_), Some(value)) => Err(directive_error(
                doc,
                ctx.node,
                specs.replace(),
                &value,
                "content and replace may not coexist on one element".to_string(),
            )
            .into()),
            (Some(value), None) => handle_content(ctx, doc, specs, &value),
            (None, Some(value)) => handle_replace(ctx, doc, specs, &value),
            (None, None) => Ok(HandlingResult::proceed(ctx)),
        }
    }
}

fn handle_content(
    ctx: ProcessingContext,
    doc: &mut Document,
    specs: &AttributeSpecs,
    value: &str,
) -> Result<HandlingResult, RenderError> {
    let (mode, expression) = grammar::parse_content_value(value)
        .map_err(|detail| directive_error(doc, ctx.node, specs.content(), value, detail))?;

    let result = evaluate_directive(&expression, doc, ctx.node, &ctx.model)?;
    if result.is_cancelled() {
        return Ok(HandlingResult::proceed(ctx));
    }
    let resolved = result.into_value(&expression).map_err(RenderError::from)?;

    if matches!(resolved, Value::Null) {
        // Null content empties the element.
        doc.clear_children(ctx.node);
        return Ok(HandlingResult::proceed(ctx));
    }

    let nodes = render_value_nodes(doc, mode, &resolved)?;
    doc.set_children(ctx.node, &nodes);
    trace!(node = ctx.node.raw(), "substituted element content");
    Ok(HandlingResult::proceed(ctx))
}

fn handle_replace(
    ctx: ProcessingContext,
    doc: &mut Document,
    specs: &AttributeSpecs,
    value: &str,
) -> Result<HandlingResult, RenderError> {
    let (mode, expression) = grammar::parse_content_value(value)
        .map_err(|detail| directive_error(doc, ctx.node, specs.replace(), value, detail))?;

    let result = evaluate_directive(&expression, doc, ctx.node, &ctx.model)?;
    if result.is_cancelled() {
        return Ok(HandlingResult::proceed(ctx));
    }
    let resolved = result.into_value(&expression).map_err(RenderError::from)?;

    if matches!(resolved, Value::Null) {
        // Null replacement removes the element entirely.
        doc.detach(ctx.node);
        return Ok(HandlingResult::halt());
    }

    let nodes = render_value_nodes(doc, mode, &resolved)?;

    // The attributes and omit-tag directives are still relevant on the
    // replacement node(s); carry them over from the replaced element.
    let attributes_value = doc.attribute(ctx.node, specs.attributes()).map(str::to_string);
    let omit_value = doc.attribute(ctx.node, specs.omit_tag()).map(str::to_string);
    for &node in &nodes {
        if !doc.is_element(node) {
            continue;
        }
        if let Some(v) = &attributes_value {
            doc.set_attribute(node, specs.attributes().clone(), v.as_str());
        }
        if let Some(v) = &omit_value {
            doc.set_attribute(node, specs.omit_tag().clone(), v.as_str());
        }
    }

    doc.replace_with(ctx.node, &nodes);
    trace!(node = ctx.node.raw(), count = nodes.len(), "replaced element");

    let exposed = nodes
        .iter()
        .map(|&node| ProcessingContext {
            node,
            model: ctx.model.create_child(),
            handlers: ctx.handlers.clone(),
        })
        .collect();
    Ok(HandlingResult::expose(exposed))
}
