use std::collections::HashMap;
use serde_json::Value;
use crate::ConvertError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Text(String),
    Integer(i64),
    Absent,
}

impl RawValue {
    /// Absent and empty text both count as missing.
    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Text(s) => s.is_empty(),
            RawValue::Integer(_) => false,
            RawValue::Absent => true,
        }
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => RawValue::Text(s),
            Value::Number(n) => match n.as_i64() {
                Some(i) => RawValue::Integer(i),
                None => RawValue::Text(n.to_string()),
            },
            Value::Bool(b) => RawValue::Text(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => RawValue::Absent,
        }
    }
}

/// One stream entry as the exporter wrote it, in whatever dialect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: HashMap<String, RawValue>,
}

impl RawRecord {
    pub fn get(&self, field: &str) -> &RawValue {
        self.fields.get(field).unwrap_or(&RawValue::Absent)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: RawValue) {
        self.fields.insert(field.into(), value);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl TryFrom<Value> for RawRecord {
    type Error = ConvertError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self {
                fields: map.into_iter().map(|(k, v)| (k, RawValue::from(v))).collect(),
            }),
            other => Err(ConvertError::InvalidRecord(format!(
                "expected an object, found {}",
                other
            ))),
        }
    }
}
