//! Single-segment object traversal.
//!
//! Resolves one path segment against an arbitrary runtime value. Failure is
//! `None`, never an error: the path evaluator reacts by trying the next
//! pipe alternative.

use crate::value::Value;

/// Resolve `segment` against `source`.
///
/// Resolution order, first match wins:
///
/// 1. a custom named-lookup capability on the value;
/// 2. a keyed container holding `segment` as a key;
/// 3. an indexed container, when `segment` parses as an in-range index;
/// 4. a built-in member of the value's type (`length`, `count`, `keys`).
pub fn traverse(source: &Value, segment: &str) -> Option<Value> {
    match source {
        Value::Object(object) => object.get_value(segment),
        Value::Map(entries) => entries
            .get(segment)
            .cloned()
            .or_else(|| builtin_member(source, segment)),
        Value::List(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index).cloned())
            .or_else(|| builtin_member(source, segment)),
        _ => builtin_member(source, segment),
    }
}

/// Built-in members of the primitive container types.
///
/// These stand in for the zero-argument readable members a model object
/// would expose in a richer runtime.
fn builtin_member(source: &Value, segment: &str) -> Option<Value> {
    match (source, segment) {
        (Value::Str(s), "length" | "count") => {
            Some(Value::int(i64::try_from(s.chars().count()).ok()?))
        }
        (Value::List(items), "length" | "count") => {
            Some(Value::int(i64::try_from(items.len()).ok()?))
        }
        (Value::Map(entries), "length" | "count") => {
            Some(Value::int(i64::try_from(entries.len()).ok()?))
        }
        (Value::Map(entries), "keys") => {
            let mut keys: Vec<&String> = entries.keys().collect();
            keys.sort();
            Some(Value::list(
                keys.into_iter().map(|k| Value::string(k.as_str())).collect(),
            ))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests;
