//! Facade-side structured attributes
//!
//! An [`Attr`] is one key/value pair attached to a record. Values are tagged
//! by [`Kind`]; a value may also be a nested group or a deferred computation
//! ([`LogValuer`]) that is forced only when a record is actually emitted.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on how many times a lazy value is forced before it is
/// rendered as text instead.
pub const MAX_LAZY_RESOLUTIONS: usize = 100;

/// A value computed on demand when the record carrying it is emitted.
///
/// `log_value` may itself return another lazy value; see [`Value::resolve`].
pub trait LogValuer: fmt::Debug + Send + Sync {
    fn log_value(&self) -> Value;
}

/// Discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Int64,
    Uint64,
    Float64,
    String,
    Duration,
    Time,
    Any,
    Group,
    LazyValue,
}

#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    Int64(i64),
    Uint64(u64),
    Float64(f64),
    String(String),
    Duration(Duration),
    Time(DateTime<Utc>),
    /// Arbitrary serializable payload. `Any(Null)` is the zero value.
    Any(serde_json::Value),
    Group(Vec<Attr>),
    Lazy(Arc<dyn LogValuer>),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Int64(_) => Kind::Int64,
            Value::Uint64(_) => Kind::Uint64,
            Value::Float64(_) => Kind::Float64,
            Value::String(_) => Kind::String,
            Value::Duration(_) => Kind::Duration,
            Value::Time(_) => Kind::Time,
            Value::Any(_) => Kind::Any,
            Value::Group(_) => Kind::Group,
            Value::Lazy(_) => Kind::LazyValue,
        }
    }

    /// Serialize any value into an `Any` payload.
    ///
    /// Types that fail to serialize fall back to their `Debug` rendering.
    pub fn any<T: Serialize + fmt::Debug + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => Value::Any(json),
            Err(_) => Value::String(format!("{:?}", value)),
        }
    }

    /// Wrap a closure as a lazy value.
    pub fn lazy<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Value::Lazy(Arc::new(LazyFn(f)))
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Value::Any(serde_json::Value::Null))
    }

    /// Force lazy values until a concrete kind is reached.
    ///
    /// Gives up after [`MAX_LAZY_RESOLUTIONS`] and returns the `Debug` text of
    /// the last valuer as a string, so a self-referential valuer terminates.
    /// Lazy values nested inside groups are left for the converter.
    pub fn resolve(self) -> Value {
        let mut current = self;
        for _ in 0..MAX_LAZY_RESOLUTIONS {
            match current {
                Value::Lazy(valuer) => current = valuer.log_value(),
                resolved => return resolved,
            }
        }
        match current {
            Value::Lazy(valuer) => Value::String(format!("{:?}", valuer)),
            resolved => resolved,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Any(serde_json::Value::Null)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::Uint64(a), Value::Uint64(b)) => a == b,
            (Value::Float64(a), Value::Float64(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Duration(a), Value::Duration(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            (Value::Any(a), Value::Any(b)) => a == b,
            (Value::Group(a), Value::Group(b)) => a == b,
            (Value::Lazy(a), Value::Lazy(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
            _ => false,
        }
    }
}

struct LazyFn<F>(F);

impl<F> fmt::Debug for LazyFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LazyFn")
    }
}

impl<F> LogValuer for LazyFn<F>
where
    F: Fn() -> Value + Send + Sync,
{
    fn log_value(&self) -> Value {
        (self.0)()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int64(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int64(i as i64)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Uint64(u)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::Uint64(u as u64)
    }
}

impl From<usize> for Value {
    fn from(u: usize) -> Self {
        Value::Uint64(u as u64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float64(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float64(f as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::Duration(d)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Time(t)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::Any(json)
    }
}

impl From<Vec<Attr>> for Value {
    fn from(attrs: Vec<Attr>) -> Self {
        Value::Group(attrs)
    }
}

impl From<Arc<dyn LogValuer>> for Value {
    fn from(valuer: Arc<dyn LogValuer>) -> Self {
        Value::Lazy(valuer)
    }
}

/// One structured key/value pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, Value::Bool(value))
    }

    pub fn int64(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, Value::Int64(value))
    }

    pub fn uint64(key: impl Into<String>, value: u64) -> Self {
        Self::new(key, Value::Uint64(value))
    }

    pub fn float64(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, Value::Float64(value))
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Value::String(value.into()))
    }

    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, Value::Duration(value))
    }

    pub fn time(key: impl Into<String>, value: DateTime<Utc>) -> Self {
        Self::new(key, Value::Time(value))
    }

    pub fn any<T: Serialize + fmt::Debug + ?Sized>(key: impl Into<String>, value: &T) -> Self {
        Self::new(key, Value::any(value))
    }

    /// A group; an empty key merges the children into the enclosing level.
    pub fn group(key: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self::new(key, Value::Group(attrs))
    }

    pub fn lazy<F>(key: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::new(key, Value::lazy(f))
    }

    /// The zero attribute (empty key, zero value) is never emitted.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.key.is_empty() && self.value.is_zero()
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for Attr {
    fn from((key, value): (K, V)) -> Self {
        Attr::new(key, value)
    }
}
