//! The iterative document processor.
//!
//! Drives the directive pipeline over a whole document using an explicit
//! worklist (open list) instead of native recursion, so document depth
//! never bounds the native call stack. The visitation order is exactly
//! that of recursive pre-order descent: a processed context's newly
//! exposed contexts are scheduled first, immediately followed by its
//! discovered children, ahead of everything previously pending.

use std::collections::VecDeque;
use std::rc::Rc;

use petal_dom::Document;
use petal_expr::{EvaluationModel, RecordedError};
use petal_value::{ExpressionResult, Value};
use tracing::{debug, trace};

use crate::cancellation::CancellationToken;
use crate::cleanup;
use crate::config::RenderingConfig;
use crate::context::{ErrorHandlerFrame, ProcessingContext};
use crate::error::RenderError;
use crate::grammar;
use crate::handlers::{directive_error, element_name, render_value_nodes};
use crate::pipeline::{ContextProcessingResult, DirectivePipeline};
use crate::specs::AttributeSpecs;

/// Processes a document by iterating the directive pipeline over a
/// worklist of contexts, with on-error recovery scoped to subtrees.
pub struct DocumentProcessor {
    config: RenderingConfig,
    pipeline: DirectivePipeline,
}

impl DocumentProcessor {
    /// A processor for the given configuration.
    pub fn new(config: RenderingConfig) -> Self {
        let pipeline = DirectivePipeline::new(AttributeSpecs::new(&config.namespace_prefix));
        DocumentProcessor { config, pipeline }
    }

    /// Process `document` in place.
    ///
    /// Returns the errors recovered by on-error directives. An error no
    /// on-error scope accepts terminates the render. The cancellation
    /// token is checked between worklist iterations.
    pub fn process(
        &self,
        document: &mut Document,
        mut model: EvaluationModel,
        token: &CancellationToken,
    ) -> Result<Vec<RecordedError>, RenderError> {
        model.set_options(self.config.keyword_options.clone());
        // Shares the error list with every scope derived from `model`.
        let tracker = model.clone();

        let mut open: VecDeque<ProcessingContext> = VecDeque::new();
        open.push_back(ProcessingContext::new(document.root(), model));

        while let Some(ctx) = open.pop_front() {
            if token.is_cancelled() {
                return Err(RenderError::Cancelled);
            }
            // Recovery needs the context after the pipeline has consumed
            // it; contexts are cheap to clone (maps of Rc values).
            let snapshot = ctx.clone();
            match self.pipeline.process(ctx, document) {
                Ok(outcome) => self.schedule(document, &mut open, outcome),
                Err(error) => self.recover(document, &mut open, &snapshot, error)?,
            }
        }

        cleanup::strip_directives(document, self.pipeline.specs());
        Ok(tracker.recorded_errors())
    }

    /// Schedule follow-up work for a processed context: its newly exposed
    /// contexts first, then its discovered children, all ahead of the
    /// previously pending tail.
    fn schedule(
        &self,
        document: &Document,
        open: &mut VecDeque<ProcessingContext>,
        outcome: ContextProcessingResult,
    ) {
        let mut front = outcome.additional;

        if let Some(survivor) = outcome.survivor {
            let mut handlers = survivor.handlers.clone();
            if let Some(expression) = document.attribute(survivor.node, self.pipeline.specs().on_error())
            {
                handlers.push(Rc::new(ErrorHandlerFrame {
                    node: survivor.node,
                    model: survivor.model.clone(),
                    expression: expression.to_string(),
                }));
            }
            for &child in document.children(survivor.node) {
                front.push(ProcessingContext {
                    node: child,
                    model: survivor.model.create_child(),
                    handlers: handlers.clone(),
                });
            }
        }

        for ctx in front.into_iter().rev() {
            open.push_front(ctx);
        }
    }

    /// Offer an error to the enclosing on-error scopes, nearest first.
    ///
    /// The failing element itself is the nearest candidate when it carries
    /// the directive; then the frames of its handler stack. An accepted
    /// error is recorded once, the guarding element's children are
    /// replaced by the rendered on-error value, and every pending context
    /// belonging to the recovered subtree is purged. A handler that
    /// itself fails passes the original error outward.
    fn recover(
        &self,
        document: &mut Document,
        open: &mut VecDeque<ProcessingContext>,
        failing: &ProcessingContext,
        error: RenderError,
    ) -> Result<(), RenderError> {
        let specs = self.pipeline.specs();

        let mut candidates: Vec<ErrorHandlerFrame> = Vec::new();
        if let Some(expression) = document.attribute(failing.node, specs.on_error()) {
            candidates.push(ErrorHandlerFrame {
                node: failing.node,
                model: failing.model.clone(),
                expression: expression.to_string(),
            });
        }
        candidates.extend(failing.handlers.iter().rev().map(|frame| (**frame).clone()));

        for frame in candidates {
            match self.apply_on_error(document, &frame, &error) {
                Ok(()) => {
                    debug!(
                        guard = frame.node.raw(),
                        error = %error,
                        "on-error directive recovered a rendering failure"
                    );
                    open.retain(|pending| {
                        pending.node != frame.node
                            && !pending.handlers.iter().any(|f| f.node == frame.node)
                    });
                    return Ok(());
                }
                Err(handler_error) => {
                    debug!(
                        guard = frame.node.raw(),
                        error = %handler_error,
                        "on-error handler failed; offering to enclosing scope"
                    );
                }
            }
        }

        Err(error)
    }

    /// Run one on-error directive against an error.
    fn apply_on_error(
        &self,
        document: &mut Document,
        frame: &ErrorHandlerFrame,
        error: &RenderError,
    ) -> Result<(), RenderError> {
        let specs = self.pipeline.specs();
        let (mode, expression) =
            grammar::parse_content_value(&frame.expression).map_err(|detail| {
                RenderError::from(directive_error(
                    document,
                    frame.node,
                    specs.on_error(),
                    &frame.expression,
                    detail,
                ))
            })?;

        // The handler expression may refer to the failure as `error`.
        let mut scope = frame.model.create_child();
        scope.define_local("error", Value::string(error.to_string()));

        let result = petal_expr::evaluate(&expression, document, frame.node, &scope)
            .map_err(RenderError::from)?;

        match result {
            // Cancellation leaves the element as it stands.
            ExpressionResult::Cancelled => {}
            ExpressionResult::Value(Value::Null) => document.clear_children(frame.node),
            ExpressionResult::Value(substituted) => {
                let nodes = render_value_nodes(document, mode, &substituted)?;
                document.set_children(frame.node, &nodes);
            }
        }

        // Recorded only once the recovery is committed; a failure above
        // passes the original error to the enclosing scope instead.
        frame.model.record_error(RecordedError {
            message: error.to_string(),
            element: element_name(document, frame.node),
        });

        trace!(guard = frame.node.raw(), "substituted on-error content");
        Ok(())
    }
}
