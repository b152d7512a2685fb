//! In-memory backend that records every written entry

use crate::core::{fields_to_json, BackendLevel, Core, Entry, Field, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// One write observed by an [`ObservedCore`].
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedEntry {
    pub entry: Entry,
    /// Bound fields followed by the call's own fields.
    pub context: Vec<Field>,
}

impl ObservedEntry {
    /// Fields rendered as a JSON object, namespaces nested.
    pub fn context_json(&self) -> serde_json::Value {
        serde_json::Value::Object(fields_to_json(&self.context))
    }

    /// First top-level field with `key`.
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.context.iter().find(|f| f.key == key)
    }
}

/// Recording core for tests and diagnostics.
///
/// Clones share one log, so a handler can own a clone while the caller keeps
/// another to inspect what was written.
#[derive(Debug, Clone)]
pub struct ObservedCore {
    level: BackendLevel,
    bound: Arc<Vec<Field>>,
    logs: Arc<Mutex<Vec<ObservedEntry>>>,
}

impl ObservedCore {
    pub fn new(level: impl Into<BackendLevel>) -> Self {
        Self {
            level: level.into(),
            bound: Arc::new(Vec::new()),
            logs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn entries(&self) -> Vec<ObservedEntry> {
        self.logs.lock().clone()
    }

    /// Remove and return everything recorded so far
    pub fn take_all(&self) -> Vec<ObservedEntry> {
        std::mem::take(&mut *self.logs.lock())
    }

    pub fn len(&self) -> usize {
        self.logs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.lock().is_empty()
    }

    pub fn clear(&self) {
        self.logs.lock().clear();
    }
}

impl Core for ObservedCore {
    fn name(&self) -> &str {
        "observer"
    }

    fn enabled(&self, level: BackendLevel) -> bool {
        level >= self.level
    }

    fn with(&self, fields: Vec<Field>) -> Arc<dyn Core> {
        let mut bound = Vec::with_capacity(self.bound.len() + fields.len());
        bound.extend(self.bound.iter().cloned());
        bound.extend(fields);
        Arc::new(Self {
            level: self.level,
            bound: Arc::new(bound),
            logs: Arc::clone(&self.logs),
        })
    }

    fn write(&self, entry: &Entry, fields: Vec<Field>) -> Result<()> {
        let mut context = Vec::with_capacity(self.bound.len() + fields.len());
        context.extend(self.bound.iter().cloned());
        context.extend(fields);
        self.logs.lock().push(ObservedEntry {
            entry: entry.clone(),
            context,
        });
        Ok(())
    }
}
