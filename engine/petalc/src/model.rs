//! Loading the rendering model from JSON.

use std::path::Path;

use petal_value::{Value, ValueMap};
use thiserror::Error;

/// The model file could not be loaded.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot read model file: {0}")]
    Io(#[from] std::io::Error),
    #[error("model file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read a JSON file and convert it to a runtime value.
pub fn load_model(path: &Path) -> Result<Value, ModelError> {
    let text = std::fs::read_to_string(path)?;
    let json: serde_json::Value = serde_json::from_str(&text)?;
    Ok(value_from_json(&json))
}

/// Convert a JSON document into the engine's value model.
pub fn value_from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::int(i),
            None => Value::float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::string(s.as_str()),
        serde_json::Value::Array(items) => {
            Value::list(items.iter().map(value_from_json).collect())
        }
        serde_json::Value::Object(entries) => {
            let mut map = ValueMap::default();
            for (key, value) in entries {
                map.insert(key.clone(), value_from_json(value));
            }
            Value::map(map)
        }
    }
}
