//! The `render` and `check` commands.

use std::path::PathBuf;

use petal_dom::{Document, NodeId};
use petal_tal::{
    grammar, process_document, AttributeSpecs, EvaluationModel, RenderingConfig,
};
use petal_value::Value;
use tracing::info;

use crate::model::load_model;

/// Options for `petal render`.
#[derive(Debug, Default)]
pub struct RenderOptions {
    /// JSON file providing the model (`here`). Null when absent.
    pub model: Option<PathBuf>,
    /// Output file. Stdout when absent.
    pub output: Option<PathBuf>,
}

/// Render a template file. Returns the process exit code.
pub fn render_file(template_path: &str, options: &RenderOptions) -> i32 {
    let source = match std::fs::read_to_string(template_path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("error: cannot read '{template_path}': {error}");
            return 1;
        }
    };

    let mut document = match Document::parse(&source) {
        Ok(document) => document,
        Err(error) => {
            eprintln!("error: '{template_path}': {error}");
            return 1;
        }
    };

    let here = match &options.model {
        Some(path) => match load_model(path) {
            Ok(value) => value,
            Err(error) => {
                eprintln!("error: {error}");
                return 1;
            }
        },
        None => Value::Null,
    };

    let model = EvaluationModel::new(here);
    let recovered = match process_document(&mut document, model, &RenderingConfig::default()) {
        Ok(recovered) => recovered,
        Err(error) => {
            eprintln!("error: {error}");
            return 1;
        }
    };

    for error in &recovered {
        eprintln!("warning: recovered on <{}>: {}", error.element, error.message);
    }
    info!(recovered = recovered.len(), "render complete");

    let rendered = document.serialize();
    match &options.output {
        Some(path) => {
            if let Err(error) = std::fs::write(path, rendered) {
                eprintln!("error: cannot write '{}': {error}", path.display());
                return 1;
            }
        }
        None => println!("{rendered}"),
    }
    0
}

/// Check a template's directive grammar without rendering. Returns the
/// process exit code.
pub fn check_file(template_path: &str) -> i32 {
    let source = match std::fs::read_to_string(template_path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("error: cannot read '{template_path}': {error}");
            return 1;
        }
    };

    let document = match Document::parse(&source) {
        Ok(document) => document,
        Err(error) => {
            eprintln!("error: '{template_path}': {error}");
            return 1;
        }
    };

    let problems = collect_grammar_problems(&document, &AttributeSpecs::default());
    if problems.is_empty() {
        println!("{template_path}: ok");
        return 0;
    }
    for problem in &problems {
        eprintln!("{template_path}: {problem}");
    }
    1
}

/// Walk every element and validate each directive attribute's grammar.
fn collect_grammar_problems(document: &Document, specs: &AttributeSpecs) -> Vec<String> {
    let mut problems = Vec::new();
    let mut work: Vec<NodeId> = vec![document.root()];

    while let Some(node) = work.pop() {
        work.extend(document.children(node).iter().rev().copied());
        let Some(element) = document.element(node) else {
            continue;
        };
        let name = element.name.to_string();

        let mut note = |attribute: &petal_dom::QName, result: Result<(), String>| {
            if let Err(detail) = result {
                problems.push(format!("<{name}> {attribute}: {detail}"));
            }
        };

        if let Some(value) = document.attribute(node, specs.define()) {
            note(specs.define(), grammar::parse_definitions(value).map(drop));
        }
        if let Some(value) = document.attribute(node, specs.repeat()) {
            note(specs.repeat(), grammar::parse_repeat(value).map(drop));
        }
        for attribute in [specs.content(), specs.replace(), specs.on_error()] {
            if let Some(value) = document.attribute(node, attribute) {
                note(attribute, grammar::parse_content_value(value).map(drop));
            }
        }
        if let Some(value) = document.attribute(node, specs.attributes()) {
            note(
                specs.attributes(),
                grammar::parse_attribute_assignments(value).map(drop),
            );
        }
        if document.attribute(node, specs.content()).is_some()
            && document.attribute(node, specs.replace()).is_some()
        {
            problems.push(format!(
                "<{name}>: content and replace may not coexist on one element"
            ));
        }
    }
    problems
}
