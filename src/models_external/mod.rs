//! Typed views over the provider's raw JSON.
//!
//! Every record is built from a `serde_json::Value` by a total function: a missing
//! or wrong-typed key becomes `None` or an empty list, never an error.

use serde_json::Value;

use crate::models::StringOrNum;

pub mod commentary;
pub mod live_matches;
pub mod scorecard;

/// Outcome of reading a key that should hold a list.
#[derive(Debug, PartialEq)]
pub enum ListField<'a> {
    List(&'a [Value]),
    Missing,
    WrongType(&'static str),
}

impl<'a> ListField<'a> {
    pub fn read(value: &'a Value, key: &str) -> ListField<'a> {
        match value.get(key) {
            Some(Value::Array(items)) => ListField::List(items),
            None => ListField::Missing,
            Some(other) => ListField::WrongType(type_name(other)),
        }
    }

    pub fn items(&self) -> &'a [Value] {
        match self {
            ListField::List(items) => *items,
            _ => &[],
        }
    }
}

pub fn list<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    ListField::read(value, key).items()
}

pub fn text(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

pub fn scalar(value: &Value, key: &str) -> Option<StringOrNum> {
    value.get(key).and_then(StringOrNum::from_value)
}

pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
