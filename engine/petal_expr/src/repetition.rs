//! Per-iteration metadata for repeat directives.

use petal_dom::NodeId;
use petal_value::{TraversableValue, Value};

use crate::ordinal::{alphabetic_value, roman_numeral};

/// Contextual information about one iteration of a repetition.
///
/// One instance exists per iteration; it is created when the repeat
/// handler expands a sequence and discarded once the iteration's subtree
/// has been processed. The derived views (`even`, `letter`, ...) are
/// computed on demand from the index and count.
#[derive(Clone, Debug)]
pub struct RepetitionInfo {
    /// The repeat variable name.
    pub name: String,
    /// Total number of items in the source sequence.
    pub count: usize,
    /// Zero-based index of the current iteration.
    pub index: usize,
    /// The cloned element associated with this iteration.
    pub node: NodeId,
    /// The value of the current item.
    pub value: Value,
}

impl RepetitionInfo {
    /// Describe iteration `index` of `count` items bound to `name`.
    pub fn new(
        name: impl Into<String>,
        count: usize,
        index: usize,
        node: NodeId,
        value: Value,
    ) -> Self {
        RepetitionInfo {
            name: name.into(),
            count,
            index,
            node,
            value,
        }
    }

    fn int(n: usize) -> Value {
        Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl TraversableValue for RepetitionInfo {
    fn get_value(&self, name: &str) -> Option<Value> {
        let number = self.index + 1;
        match name {
            "index" => Some(Self::int(self.index)),
            "number" => Some(Self::int(number)),
            "even" => Some(Value::Bool(self.index % 2 == 0)),
            "odd" => Some(Value::Bool(self.index % 2 != 0)),
            "start" => Some(Value::Bool(self.index == 0)),
            "end" => Some(Value::Bool(self.index + 1 == self.count)),
            "length" => Some(Self::int(self.count)),
            "letter" => Some(Value::string(alphabetic_value(self.index))),
            "Letter" => Some(Value::string(alphabetic_value(self.index).to_uppercase())),
            "roman" => Some(Value::string(roman_numeral(number).to_lowercase())),
            "Roman" => Some(Value::string(roman_numeral(number))),
            _ => None,
        }
    }
}
