//! The fixed-order directive pipeline.

use petal_dom::Document;

use crate::context::ProcessingContext;
use crate::error::RenderError;
use crate::handlers::{
    AttributesHandler, ConditionHandler, ContentOrReplaceHandler, DefineHandler, DirectiveHandler,
    OmitTagHandler, RepeatHandler,
};
use crate::specs::AttributeSpecs;

/// Outcome of running a whole pipeline over one context.
#[derive(Debug, Default)]
pub struct ContextProcessingResult {
    /// The context that survived every stage, if any. Its children are the
    /// next things to discover.
    pub survivor: Option<ProcessingContext>,
    /// Contexts that must be processed from scratch as independent roots.
    pub additional: Vec<ProcessingContext>,
}

/// The per-element directive pipeline, applied in fixed order:
/// define, condition, repeat, content-or-replace, omit-tag, attributes.
///
/// On-error is not a stage: it scopes recovery around an element and its
/// descendants, and lives in the processor.
pub struct DirectivePipeline {
    specs: AttributeSpecs,
    stages: Vec<Box<dyn DirectiveHandler>>,
}

impl DirectivePipeline {
    /// A pipeline over the given attribute specs.
    pub fn new(specs: AttributeSpecs) -> Self {
        DirectivePipeline {
            specs,
            stages: vec![
                Box::new(DefineHandler),
                Box::new(ConditionHandler),
                Box::new(RepeatHandler),
                Box::new(ContentOrReplaceHandler),
                Box::new(OmitTagHandler),
                Box::new(AttributesHandler),
            ],
        }
    }

    /// The attribute specs this pipeline matches against.
    pub fn specs(&self) -> &AttributeSpecs {
        &self.specs
    }

    /// Run every stage against `ctx`, stopping when a stage ends the
    /// element's participation.
    pub fn process(
        &self,
        ctx: ProcessingContext,
        doc: &mut Document,
    ) -> Result<ContextProcessingResult, RenderError> {
        let mut current = ctx;
        let mut additional = Vec::new();

        for stage in &self.stages {
            let result = stage.handle(current, doc, &self.specs)?;
            additional.extend(result.newly_exposed);
            if !result.continue_pipeline {
                return Ok(ContextProcessingResult {
                    survivor: None,
                    additional,
                });
            }
            let Some(next) = result.live.into_iter().next() else {
                return Ok(ContextProcessingResult {
                    survivor: None,
                    additional,
                });
            };
            current = next;
        }

        Ok(ContextProcessingResult {
            survivor: Some(current),
            additional,
        })
    }
}
