use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::value::{TraversableValue, ValueMap};

struct Account;

impl TraversableValue for Account {
    fn get_value(&self, name: &str) -> Option<Value> {
        match name {
            "balance" => Some(Value::int(100)),
            "owner" => Some(Value::string("fred")),
            _ => None,
        }
    }
}

fn sample_map() -> Value {
    let mut entries = ValueMap::default();
    entries.insert("name".into(), Value::string("petal"));
    entries.insert("size".into(), Value::int(7));
    Value::map(entries)
}

#[test]
fn test_custom_lookup_wins() {
    let account = Value::object(Rc::new(Account));
    assert_eq!(traverse(&account, "balance"), Some(Value::int(100)));
    assert_eq!(traverse(&account, "missing"), None);
}

#[test]
fn test_keyed_lookup() {
    let map = sample_map();
    assert_eq!(traverse(&map, "name"), Some(Value::string("petal")));
    assert_eq!(traverse(&map, "absent"), None);
}

#[test]
fn test_indexed_lookup() {
    let list = Value::list(vec![Value::string("a"), Value::string("b")]);
    assert_eq!(traverse(&list, "0"), Some(Value::string("a")));
    assert_eq!(traverse(&list, "1"), Some(Value::string("b")));
    assert_eq!(traverse(&list, "2"), None);
    assert_eq!(traverse(&list, "-1"), None);
}

#[test]
fn test_builtin_members() {
    let list = Value::list(vec![Value::int(1), Value::int(2), Value::int(3)]);
    assert_eq!(traverse(&list, "length"), Some(Value::int(3)));
    assert_eq!(traverse(&list, "count"), Some(Value::int(3)));

    let s = Value::string("hello");
    assert_eq!(traverse(&s, "length"), Some(Value::int(5)));

    let map = sample_map();
    assert_eq!(traverse(&map, "count"), Some(Value::int(2)));
    assert_eq!(
        traverse(&map, "keys"),
        Some(Value::list(vec![
            Value::string("name"),
            Value::string("size"),
        ]))
    );
}

#[test]
fn test_map_key_shadows_builtin_member() {
    let mut entries = ValueMap::default();
    entries.insert("length".into(), Value::string("shadowed"));
    let map = Value::map(entries);
    assert_eq!(traverse(&map, "length"), Some(Value::string("shadowed")));
}

#[test]
fn test_primitives_have_no_members() {
    assert_eq!(traverse(&Value::int(3), "anything"), None);
    assert_eq!(traverse(&Value::Null, "anything"), None);
}
