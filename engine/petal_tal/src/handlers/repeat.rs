//! The `repeat` directive: sequence expansion.

use std::rc::Rc;

use petal_dom::Document;
use petal_expr::RepetitionInfo;
use petal_value::Value;
use tracing::{trace, warn};

use super::{directive_error, evaluate_directive, DirectiveHandler};
use crate::context::{HandlingResult, ProcessingContext};
use crate::error::RenderError;
use crate::grammar;
use crate::specs::AttributeSpecs;

/// Expands an element once per item of an iterable sequence.
///
/// Each clone is inserted before the original's position (newline-
/// separated), gets its own child scope with the repeat variable bound as
/// a local alongside its repetition descriptor, and has the repeat
/// attribute removed so it is not expanded again. The original template
/// element is removed, and the clones are returned as newly exposed
/// contexts: each must run the full pipeline independently.
pub struct RepeatHandler;

impl DirectiveHandler for RepeatHandler {
    fn handle(
        &self,
        ctx: ProcessingContext,
        doc: &mut Document,
        specs: &AttributeSpecs,
    ) -> Result<HandlingResult, RenderError> {
        let Some(value) = doc.attribute(ctx.node, specs.repeat()) else {
            return Ok(HandlingResult::proceed(ctx));
        };
        let value = value.to_string();

        let (variable, expression) = grammar::parse_repeat(&value)
            .map_err(|detail| directive_error(doc, ctx.node, specs.repeat(), &value, detail))?;

        let result = evaluate_directive(&expression, doc, ctx.node, &ctx.model)?;
        if result.is_cancelled() {
            return Ok(HandlingResult::proceed(ctx));
        }
        if matches!(result.expect_value(&expression), Ok(Value::Null)) {
            return Ok(HandlingResult::proceed(ctx));
        }
        let items = result
            .coerce_to_sequence(&expression)
            .map_err(RenderError::from)?;

        if doc.parent(ctx.node).is_none() {
            warn!("repeat directive on the document root has nowhere to expand");
            return Ok(HandlingResult::proceed(ctx));
        }

        let count = items.len();
        trace!(node = ctx.node.raw(), count, variable = %variable, "expanding repetition");

        let mut exposed = Vec::with_capacity(count);
        for (index, item) in items.iter().enumerate() {
            let clone = doc.clone_subtree(ctx.node);
            doc.remove_attribute(clone, specs.repeat());
            doc.insert_before(clone, ctx.node);
            if index + 1 < count {
                // Separate consecutive iterations so omitted tags do not
                // run their text together.
                let separator = doc.create_text("\n");
                doc.insert_before(separator, ctx.node);
            }

            let mut model = ctx.model.create_child();
            model.set_repetition(Rc::new(RepetitionInfo::new(
                variable.as_str(),
                count,
                index,
                clone,
                item.clone(),
            )));
            model.define_local(variable.as_str(), item.clone());

            exposed.push(ProcessingContext {
                node: clone,
                model,
                handlers: ctx.handlers.clone(),
            });
        }

        // The original element was only ever a template for the clones.
        doc.detach(ctx.node);
        Ok(HandlingResult::expose(exposed))
    }
}
