//! Petal TAL - The directive interpretation engine.
//!
//! Interprets template attribute language directives found on document
//! elements: `define`, `condition`, `repeat`, `content`, `replace`,
//! `omit-tag`, `attributes`, and `on-error`.
//!
//! # Architecture
//!
//! - `AttributeSpecs`: the directive attribute names under a namespace prefix
//! - `grammar`: the small value grammars of the directive attributes
//! - `handlers`: one handler per directive, with a uniform contract
//! - `DirectivePipeline`: the fixed-order composition of the handlers
//! - `DocumentProcessor`: worklist-driven iterative traversal with
//!   on-error recovery and cooperative cancellation
//! - `cleanup`: post-processing removal of directive vocabulary
//!
//! The entry points are [`process_document`] (mutates the tree in place,
//! returning the recovered errors) and [`render_to_string`].

mod cancellation;
mod cleanup;
mod config;
mod context;
mod error;
pub mod grammar;
pub mod handlers;
mod pipeline;
mod processor;
mod specs;

pub use cancellation::CancellationToken;
pub use config::RenderingConfig;
pub use context::{ErrorHandlerFrame, HandlingResult, ProcessingContext};
pub use error::{DirectiveParseError, RenderError};
pub use pipeline::{ContextProcessingResult, DirectivePipeline};
pub use processor::DocumentProcessor;
pub use specs::AttributeSpecs;

pub use petal_expr::{EvaluationModel, RecordedError};

use petal_dom::Document;

/// Interpret every directive in `document`, mutating it in place.
///
/// Returns the errors recovered by on-error directives (an empty list for
/// a clean render). An unrecovered error terminates the render.
pub fn process_document(
    document: &mut Document,
    model: EvaluationModel,
    config: &RenderingConfig,
) -> Result<Vec<RecordedError>, RenderError> {
    DocumentProcessor::new(config.clone()).process(document, model, &CancellationToken::new())
}

/// Process a document and serialize the result.
pub fn render_to_string(
    document: &mut Document,
    model: EvaluationModel,
    config: &RenderingConfig,
) -> Result<String, RenderError> {
    process_document(document, model, config)?;
    Ok(document.serialize())
}
