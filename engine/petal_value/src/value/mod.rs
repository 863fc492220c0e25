//! Runtime values for the petal expression language.
//!
//! All heap-backed variants hold `Rc` so that cloning a `Value` is cheap;
//! construction goes through the factory methods (`Value::string`,
//! `Value::list`, ...) rather than the variants directly.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

/// String-keyed map of values, as produced by keyed containers in a model.
pub type ValueMap = FxHashMap<String, Value>;

/// The named-lookup capability for custom model objects.
///
/// A value wrapped in [`Value::Object`] resolves path segments through this
/// trait instead of the built-in container rules. Implementors may also
/// provide a boolean conversion (consulted during truthiness coercion) and
/// a textual rendering (consulted when the object is written into
/// document content).
pub trait TraversableValue {
    /// Resolve a single named segment against this object.
    ///
    /// `None` is a normal negative result, not an error; the caller decides
    /// how to react (usually by trying the next pipe alternative).
    fn get_value(&self, name: &str) -> Option<Value>;

    /// Optional boolean conversion, used by truthiness coercion.
    fn as_bool(&self) -> Option<bool> {
        None
    }

    /// Optional textual rendering, used when the object becomes content.
    fn display_text(&self) -> Option<String> {
        None
    }
}

/// Runtime value in the petal expression language.
#[derive(Clone)]
pub enum Value {
    /// The absent value. Distinct from [`Value::Cancellation`].
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    Str(Rc<str>),
    /// Ordered sequence of values.
    List(Rc<Vec<Value>>),
    /// String-keyed container of values.
    Map(Rc<ValueMap>),
    /// Custom object resolving lookups through [`TraversableValue`].
    Object(Rc<dyn TraversableValue>),
    /// The cancellation marker: "leave the current target unmodified".
    ///
    /// This is what the built-in `default` root resolves to. It must never
    /// be dereferenced as an ordinary value.
    Cancellation,
}

// Factory methods

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Rc::from(s.into()))
    }

    /// Create a list value.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(items))
    }

    /// Create a map value.
    #[inline]
    pub fn map(entries: ValueMap) -> Self {
        Value::Map(Rc::new(entries))
    }

    /// Create an integer value.
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    /// Create a float value.
    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    /// Create a boolean value.
    #[inline]
    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    /// Wrap a custom object.
    #[inline]
    pub fn object(object: Rc<dyn TraversableValue>) -> Self {
        Value::Object(object)
    }
}

impl Value {
    /// Name of this value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
            Value::Cancellation => "cancellation",
        }
    }

    /// `true` if this is the cancellation marker.
    #[inline]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Value::Cancellation)
    }

    /// `true` if this is the null value.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Coerce this value to a boolean.
    ///
    /// Null is falsy; a numeric zero is falsy and any other numeric is
    /// truthy; an empty string is falsy; a boolean is used as-is; an object
    /// advertising a boolean conversion uses that; any other non-null value
    /// is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Object(object) => object.as_bool().unwrap_or(true),
            Value::List(_) | Value::Map(_) | Value::Cancellation => true,
        }
    }

    /// Render this value as document text.
    ///
    /// Null renders as the empty string, matching the substitution rules of
    /// the content directives and string interpolation.
    pub fn render_string(&self) -> String {
        match self {
            Value::Null | Value::Cancellation => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Str(s) => s.to_string(),
            Value::List(items) => {
                let rendered: Vec<String> = items.iter().map(Value::render_string).collect();
                rendered.join(", ")
            }
            Value::Map(entries) => {
                let mut keys: Vec<&String> = entries.keys().collect();
                keys.sort();
                let rendered: Vec<String> = keys
                    .into_iter()
                    .map(|k| format!("{k}: {}", entries[k].render_string()))
                    .collect();
                rendered.join(", ")
            }
            Value::Object(object) => object.display_text().unwrap_or_default(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) | (Value::Cancellation, Value::Cancellation) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            // Objects have no structural equality; compare identity.
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Map(entries) => {
                let mut keys: Vec<&String> = entries.keys().collect();
                keys.sort();
                let mut map = f.debug_map();
                for k in keys {
                    map.entry(k, &entries[k]);
                }
                map.finish()
            }
            Value::Object(_) => write!(f, "Object(..)"),
            Value::Cancellation => write!(f, "Cancellation"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

#[cfg(test)]
mod tests;
