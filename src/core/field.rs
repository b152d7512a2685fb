//! Backend-side field representation
//!
//! Fields are what a backend core receives: already resolved, redacted and
//! flattened. A [`FieldValue::Namespace`] marker means "every following field
//! nests under this path".

use super::attribute::Kind;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value as JsonValue};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Int64(i64),
    Uint64(u64),
    Float64(f64),
    String(String),
    Duration(Duration),
    Time(DateTime<Utc>),
    Any(JsonValue),
    Object(Vec<Field>),
    Namespace(Vec<String>),
}

impl FieldValue {
    /// Attribute kind this field was built from; `None` for namespace markers.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            FieldValue::Bool(_) => Some(Kind::Bool),
            FieldValue::Int64(_) => Some(Kind::Int64),
            FieldValue::Uint64(_) => Some(Kind::Uint64),
            FieldValue::Float64(_) => Some(Kind::Float64),
            FieldValue::String(_) => Some(Kind::String),
            FieldValue::Duration(_) => Some(Kind::Duration),
            FieldValue::Time(_) => Some(Kind::Time),
            FieldValue::Any(_) => Some(Kind::Any),
            FieldValue::Object(_) => Some(Kind::Group),
            FieldValue::Namespace(_) => None,
        }
    }

    /// Convert to serde_json::Value for JSON serialization
    ///
    /// Durations become float seconds and times RFC 3339 strings.
    #[must_use]
    pub fn to_json_value(&self) -> JsonValue {
        match self {
            FieldValue::Bool(b) => JsonValue::Bool(*b),
            FieldValue::Int64(i) => JsonValue::Number((*i).into()),
            FieldValue::Uint64(u) => JsonValue::Number((*u).into()),
            FieldValue::Float64(f) => float_to_json(*f),
            FieldValue::String(s) => JsonValue::String(s.clone()),
            FieldValue::Duration(d) => float_to_json(d.as_secs_f64()),
            FieldValue::Time(t) => JsonValue::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            FieldValue::Any(json) => json.clone(),
            FieldValue::Object(fields) => JsonValue::Object(fields_to_json(fields)),
            FieldValue::Namespace(_) => JsonValue::Object(Map::new()),
        }
    }
}

fn float_to_json(f: f64) -> JsonValue {
    serde_json::Number::from_f64(f)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(key: impl Into<String>, value: FieldValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, FieldValue::Bool(value))
    }

    pub fn int64(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, FieldValue::Int64(value))
    }

    pub fn uint64(key: impl Into<String>, value: u64) -> Self {
        Self::new(key, FieldValue::Uint64(value))
    }

    pub fn float64(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, FieldValue::Float64(value))
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, FieldValue::String(value.into()))
    }

    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, FieldValue::Duration(value))
    }

    pub fn time(key: impl Into<String>, value: DateTime<Utc>) -> Self {
        Self::new(key, FieldValue::Time(value))
    }

    pub fn any(key: impl Into<String>, value: JsonValue) -> Self {
        Self::new(key, FieldValue::Any(value))
    }

    pub fn object(key: impl Into<String>, fields: Vec<Field>) -> Self {
        Self::new(key, FieldValue::Object(fields))
    }

    /// Namespace marker for a group path; the key is the dotted path.
    pub fn namespace(path: &[String]) -> Self {
        Self::new(path.join("."), FieldValue::Namespace(path.to_vec()))
    }

    #[inline]
    pub fn is_namespace(&self) -> bool {
        matches!(self.value, FieldValue::Namespace(_))
    }
}

/// Build a JSON object from an ordered field list.
///
/// A namespace marker opens one nested object per path segment; all fields
/// after it land in the innermost one. Later keys overwrite earlier ones, and
/// a namespace always closes after its siblings, so its object replaces an
/// earlier field of the same name.
pub fn fields_to_json(fields: &[Field]) -> Map<String, JsonValue> {
    let mut stack: Vec<(String, Map<String, JsonValue>)> = vec![(String::new(), Map::new())];

    for field in fields {
        match &field.value {
            FieldValue::Namespace(path) => {
                for name in path {
                    stack.push((name.clone(), Map::new()));
                }
            }
            value => {
                if let Some((_, top)) = stack.last_mut() {
                    top.insert(field.key.clone(), value.to_json_value());
                }
            }
        }
    }

    while stack.len() > 1 {
        if let Some((name, map)) = stack.pop() {
            if let Some((_, parent)) = stack.last_mut() {
                parent.insert(name, JsonValue::Object(map));
            }
        }
    }

    stack.pop().map(|(_, map)| map).unwrap_or_default()
}
