//! Structural events produced by the lexer

/// Scalar token payload
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    /// Integer that fits in `i64`
    Int(i64),
    /// Non-negative integer beyond `i64::MAX`
    UInt(u64),
    /// Any number with a fraction or exponent, or an integer beyond `u64`
    Float(f64),
    String(String),
}

impl ScalarValue {
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ScalarValue::Null => serde_json::Value::Null,
            ScalarValue::Bool(b) => serde_json::Value::Bool(*b),
            ScalarValue::Int(i) => serde_json::Value::from(*i),
            ScalarValue::UInt(u) => serde_json::Value::from(*u),
            ScalarValue::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            ScalarValue::String(s) => serde_json::Value::String(s.clone()),
        }
    }
}

/// One structural event of a JSON document
#[derive(Debug, Clone, PartialEq)]
pub enum JsonEvent {
    StartObject,
    StartArray,
    FieldName(String),
    Scalar(ScalarValue),
    EndObject,
    EndArray,
}

impl JsonEvent {
    #[inline]
    #[must_use]
    pub fn is_start(&self) -> bool {
        matches!(self, JsonEvent::StartObject | JsonEvent::StartArray)
    }

    #[inline]
    #[must_use]
    pub fn is_end(&self) -> bool {
        matches!(self, JsonEvent::EndObject | JsonEvent::EndArray)
    }
}
