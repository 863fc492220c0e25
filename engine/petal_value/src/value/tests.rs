use std::rc::Rc;

use super::*;

struct Widget {
    truthy: Option<bool>,
}

impl TraversableValue for Widget {
    fn get_value(&self, name: &str) -> Option<Value> {
        (name == "size").then(|| Value::int(3))
    }

    fn as_bool(&self) -> Option<bool> {
        self.truthy
    }

    fn display_text(&self) -> Option<String> {
        Some("widget".into())
    }
}

#[test]
fn test_truthiness_of_primitives() {
    assert!(!Value::Null.is_truthy());
    assert!(!Value::int(0).is_truthy());
    assert!(Value::int(1).is_truthy());
    assert!(Value::int(-1).is_truthy());
    assert!(!Value::float(0.0).is_truthy());
    assert!(Value::float(0.5).is_truthy());
    assert!(!Value::string("").is_truthy());
    assert!(Value::string("a").is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(Value::Bool(true).is_truthy());
}

#[test]
fn test_truthiness_of_containers() {
    // Containers are non-null objects: truthy even when empty.
    assert!(Value::list(vec![]).is_truthy());
    assert!(Value::map(ValueMap::default()).is_truthy());
}

#[test]
fn test_truthiness_of_objects() {
    let plain = Value::object(Rc::new(Widget { truthy: None }));
    assert!(plain.is_truthy());

    let falsy = Value::object(Rc::new(Widget {
        truthy: Some(false),
    }));
    assert!(!falsy.is_truthy());
}

#[test]
fn test_render_string() {
    assert_eq!(Value::Null.render_string(), "");
    assert_eq!(Value::string("hi").render_string(), "hi");
    assert_eq!(Value::int(42).render_string(), "42");
    assert_eq!(Value::Bool(true).render_string(), "true");
    assert_eq!(
        Value::list(vec![Value::int(1), Value::int(2)]).render_string(),
        "1, 2"
    );
    assert_eq!(
        Value::object(Rc::new(Widget { truthy: None })).render_string(),
        "widget"
    );
}

#[test]
fn test_object_equality_is_identity() {
    let object: Rc<dyn TraversableValue> = Rc::new(Widget { truthy: None });
    let a = Value::Object(Rc::clone(&object));
    let b = Value::Object(object);
    assert_eq!(a, b);

    let other = Value::object(Rc::new(Widget { truthy: None }));
    assert_ne!(a, other);
}

#[test]
fn test_cancellation_is_distinct_from_null() {
    assert_ne!(Value::Cancellation, Value::Null);
    assert!(Value::Cancellation.is_cancellation());
    assert!(!Value::Null.is_cancellation());
}
