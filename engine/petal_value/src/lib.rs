//! Petal Value - Runtime value model for the petal template engine.
//!
//! This crate provides the foundation types shared by the expression
//! evaluators and the directive handlers:
//!
//! - `Value`: the runtime value enum, with factory constructors
//! - `TraversableValue`: the named-lookup capability for custom objects
//! - `traverse`: single-segment path resolution against a value
//! - `ExpressionResult`: the tagged outcome of evaluating an expression
//! - `EvaluationError`: evaluation failure with the expression text attached
//!
//! # Thread Safety
//!
//! Values use `Rc` internally. The engine is single-threaded by design:
//! directive handlers mutate a shared document tree in place and scopes
//! share a mutable global map, so nothing here is `Send`.

pub mod error;
mod result;
mod traverse;
mod value;

pub use error::{
    cancelled_value, cannot_parse_path, no_such_value, not_iterable, EvaluationError,
    EvaluationErrorKind,
};
pub use result::ExpressionResult;
pub use traverse::traverse;
pub use value::{TraversableValue, Value, ValueMap};
