//! The `define` directive: variable bindings.

use petal_dom::Document;
use petal_value::ExpressionResult;
use tracing::trace;

use super::{directive_error, evaluate_directive, DirectiveHandler};
use crate::context::{HandlingResult, ProcessingContext};
use crate::error::RenderError;
use crate::grammar::{self, DefineScope};
use crate::specs::AttributeSpecs;

/// Parses `;`-separated `[scope] name expression` triples and binds each
/// evaluated result into the local or global map. A cancelled result
/// leaves both maps untouched. Always continues the pipeline.
pub struct DefineHandler;

impl DirectiveHandler for DefineHandler {
    fn handle(
        &self,
        mut ctx: ProcessingContext,
        doc: &mut Document,
        specs: &AttributeSpecs,
    ) -> Result<HandlingResult, RenderError> {
        let Some(value) = doc.attribute(ctx.node, specs.define()) else {
            return Ok(HandlingResult::proceed(ctx));
        };
        let value = value.to_string();

        let definitions = grammar::parse_definitions(&value)
            .map_err(|detail| directive_error(doc, ctx.node, specs.define(), &value, detail))?;

        for definition in definitions {
            let result = evaluate_directive(&definition.expression, doc, ctx.node, &ctx.model)?;
            let ExpressionResult::Value(resolved) = result else {
                // Cancelled: this particular definition is ignored.
                continue;
            };
            trace!(name = %definition.name, scope = ?definition.scope, "defined variable");
            match definition.scope {
                DefineScope::Local => ctx.model.define_local(definition.name, resolved),
                DefineScope::Global => ctx.model.define_global(definition.name, resolved),
            }
        }

        Ok(HandlingResult::proceed(ctx))
    }
}
