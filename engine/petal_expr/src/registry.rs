//! Prefix-keyed dispatch to evaluator strategies.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::error::UnrecognizedExpressionTypeError;
use crate::eval::{EvaluateExpression, NotEvaluator, PathEvaluator, StringEvaluator};
use crate::expression::Expression;

/// Maps an expression-type prefix to an evaluator strategy.
///
/// Dispatch is a case-sensitive exact match on the prefix; an absent
/// prefix selects the default (path) evaluator. Additional evaluators may
/// be registered before the registry is handed to a model.
pub struct EvaluatorRegistry {
    evaluators: FxHashMap<String, Rc<dyn EvaluateExpression>>,
    default: Rc<dyn EvaluateExpression>,
}

impl EvaluatorRegistry {
    /// A registry with the standard evaluators: `path` (also the default),
    /// `string`/`str`, and `not`.
    pub fn with_defaults() -> Self {
        let path: Rc<dyn EvaluateExpression> = Rc::new(PathEvaluator);
        let string: Rc<dyn EvaluateExpression> = Rc::new(StringEvaluator);

        let mut registry = EvaluatorRegistry {
            evaluators: FxHashMap::default(),
            default: Rc::clone(&path),
        };
        registry.register("path", path);
        registry.register("string", Rc::clone(&string));
        registry.register("str", string);
        registry.register("not", Rc::new(NotEvaluator));
        registry
    }

    /// Register (or replace) the evaluator for a prefix.
    pub fn register(&mut self, prefix: impl Into<String>, evaluator: Rc<dyn EvaluateExpression>) {
        self.evaluators.insert(prefix.into(), evaluator);
    }

    /// The evaluator for an expression's prefix.
    pub fn get(
        &self,
        expression: &Expression,
    ) -> Result<Rc<dyn EvaluateExpression>, UnrecognizedExpressionTypeError> {
        match expression.prefix() {
            None => Ok(Rc::clone(&self.default)),
            Some(prefix) => self
                .evaluators
                .get(prefix)
                .cloned()
                .ok_or_else(|| UnrecognizedExpressionTypeError {
                    prefix: prefix.to_string(),
                }),
        }
    }
}

impl Default for EvaluatorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for EvaluatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prefixes: Vec<&str> = self.evaluators.keys().map(String::as_str).collect();
        prefixes.sort_unstable();
        f.debug_struct("EvaluatorRegistry")
            .field("prefixes", &prefixes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_prefixes_dispatch() {
        let registry = EvaluatorRegistry::with_defaults();
        for text in ["path:a", "string:a", "str:a", "not:a", "a"] {
            let expression = Expression::parse(text);
            assert!(registry.get(&expression).is_ok(), "failed for {text}");
        }
    }

    #[test]
    fn test_unknown_prefix_is_an_error() {
        let registry = EvaluatorRegistry::with_defaults();
        let expression = Expression::parse("python:1 + 1");
        let err = registry.get(&expression).err().unwrap();
        assert_eq!(err.prefix, "python");
    }

    #[test]
    fn test_dispatch_is_case_sensitive() {
        let registry = EvaluatorRegistry::with_defaults();
        let expression = Expression::parse("Path:a");
        assert!(registry.get(&expression).is_err());
    }
}
