//! The unit of work for the iterative processor.

use std::rc::Rc;

use petal_dom::NodeId;
use petal_expr::EvaluationModel;

/// An enclosing on-error scope, captured when an element's children are
/// scheduled for processing.
///
/// The frame holds everything recovery needs without revisiting the tree:
/// the guarding node, the model active at it, and the on-error expression
/// text as it stood when the frame was pushed.
#[derive(Clone, Debug)]
pub struct ErrorHandlerFrame {
    /// The element carrying the on-error directive.
    pub node: NodeId,
    /// The evaluation model captured at that element.
    pub model: EvaluationModel,
    /// The raw on-error attribute value.
    pub expression: String,
}

/// A (node, model, error-handler stack) triple: one pending piece of work.
///
/// Contexts are created for the document root and for every discovered
/// child or dynamically-produced node, and destroyed once processed. The
/// handler stack is shared structurally (`Rc` frames) but the stack itself
/// is owned: sibling subtrees never observe each other's frames.
#[derive(Clone, Debug)]
pub struct ProcessingContext {
    /// The node to process.
    pub node: NodeId,
    /// The scope this node's expressions evaluate in.
    pub model: EvaluationModel,
    /// Enclosing on-error scopes, outermost first.
    pub handlers: Vec<Rc<ErrorHandlerFrame>>,
}

impl ProcessingContext {
    /// The root context of a render.
    pub fn new(node: NodeId, model: EvaluationModel) -> Self {
        ProcessingContext {
            node,
            model,
            handlers: Vec::new(),
        }
    }

    /// A context for a related node: child scope of this context's model,
    /// same handler stack.
    pub fn child(&self, node: NodeId) -> Self {
        ProcessingContext {
            node,
            model: self.model.create_child(),
            handlers: self.handlers.clone(),
        }
    }
}

/// What a directive handler did with a context.
#[derive(Debug, Default)]
pub struct HandlingResult {
    /// The contexts still live after this handler: normally one, zero if
    /// the element was deleted, many if it was multiplied.
    pub live: Vec<ProcessingContext>,
    /// Whether the remaining pipeline stages should run against `live`.
    pub continue_pipeline: bool,
    /// Contexts that bypass the remaining stages and must be processed
    /// from scratch as independent roots.
    pub newly_exposed: Vec<ProcessingContext>,
}

impl HandlingResult {
    /// The single context continues through the pipeline.
    pub fn proceed(ctx: ProcessingContext) -> Self {
        HandlingResult {
            live: vec![ctx],
            continue_pipeline: true,
            newly_exposed: Vec::new(),
        }
    }

    /// Nothing remains; the pipeline stops here.
    pub fn halt() -> Self {
        HandlingResult::default()
    }

    /// The element was replaced by `contexts`, each needing independent
    /// processing from scratch.
    pub fn expose(contexts: Vec<ProcessingContext>) -> Self {
        HandlingResult {
            live: Vec::new(),
            continue_pipeline: false,
            newly_exposed: contexts,
        }
    }
}
