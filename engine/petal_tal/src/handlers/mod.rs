//! The directive handlers.
//!
//! Each handler has the uniform contract `handle(context) -> HandlingResult`
//! and is responsible for exactly one directive. The fixed composition
//! order lives in [`crate::DirectivePipeline`].

mod attributes;
mod condition;
mod content;
mod define;
mod omit_tag;
mod repeat;

use petal_dom::{Document, NodeId, QName};
use petal_expr::EvaluationModel;
use petal_value::{ExpressionResult, Value};

use crate::context::{HandlingResult, ProcessingContext};
use crate::error::{DirectiveParseError, RenderError};
use crate::grammar::ContentMode;
use crate::specs::AttributeSpecs;

pub use attributes::AttributesHandler;
pub use condition::ConditionHandler;
pub use content::ContentOrReplaceHandler;
pub use define::DefineHandler;
pub use omit_tag::OmitTagHandler;
pub use repeat::RepeatHandler;

/// A directive handler: one stage of the per-element pipeline.
pub trait DirectiveHandler {
    /// Apply this handler's directive (if present) to the context.
    fn handle(
        &self,
        ctx: ProcessingContext,
        doc: &mut Document,
        specs: &AttributeSpecs,
    ) -> Result<HandlingResult, RenderError>;
}

/// Name of an element for error messages; non-elements have none.
pub(crate) fn element_name(doc: &Document, node: NodeId) -> String {
    doc.element_name(node)
        .map_or_else(|| "#text".to_string(), ToString::to_string)
}

/// Wrap a grammar failure with its directive's location details.
pub(crate) fn directive_error(
    doc: &Document,
    node: NodeId,
    attribute: &QName,
    value: &str,
    detail: String,
) -> DirectiveParseError {
    DirectiveParseError {
        element: element_name(doc, node),
        attribute: attribute.to_string(),
        value: value.to_string(),
        detail,
    }
}

/// Evaluate a directive expression, converting failures to [`RenderError`].
pub(crate) fn evaluate_directive(
    expression: &str,
    doc: &Document,
    node: NodeId,
    model: &EvaluationModel,
) -> Result<ExpressionResult, RenderError> {
    petal_expr::evaluate(expression, doc, node, model).map_err(RenderError::from)
}

/// Turn a substituted value into document nodes, honoring the content mode.
pub(crate) fn render_value_nodes(
    doc: &mut Document,
    mode: ContentMode,
    value: &Value,
) -> Result<Vec<NodeId>, RenderError> {
    let rendered = value.render_string();
    match mode {
        ContentMode::Text => Ok(vec![doc.create_text(rendered)]),
        ContentMode::Structure => doc.parse_fragment(&rendered).map_err(RenderError::from),
    }
}
