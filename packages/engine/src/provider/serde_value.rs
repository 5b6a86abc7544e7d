//! `serde_json::Value` provider

use serde_json::{Map, Value};

use super::JsonProvider;
use crate::lexer::ScalarValue;

/// Builds [`serde_json::Value`] trees
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonProvider;

impl JsonProvider for SerdeJsonProvider {
    type Value = Value;

    #[inline]
    fn create_object(&self) -> Value {
        Value::Object(Map::new())
    }

    #[inline]
    fn create_array(&self) -> Value {
        Value::Array(Vec::new())
    }

    #[inline]
    fn put(&self, object: &mut Value, key: String, value: Value) {
        if let Value::Object(map) = object {
            map.insert(key, value);
        }
    }

    #[inline]
    fn add(&self, array: &mut Value, value: Value) {
        if let Value::Array(items) = array {
            items.push(value);
        }
    }

    fn primitive(&self, scalar: ScalarValue) -> Value {
        match scalar {
            ScalarValue::String(s) => Value::String(s),
            other => other.to_json(),
        }
    }
}
