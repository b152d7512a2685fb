//! Backend core trait
//!
//! A core decides admission by level and performs the actual write. It is the
//! only shared mutable resource behind a handler and must be safe to call from
//! many threads at once.

use super::caller::Frame;
use super::error::Result;
use super::field::Field;
use super::log_level::BackendLevel;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Event metadata handed to a core, independent of the structured fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub level: BackendLevel,
    pub time: DateTime<Utc>,
    pub message: String,
    pub logger_name: String,
    pub caller: Option<Frame>,
    pub stack: Option<String>,
}

impl Entry {
    pub fn new(
        level: BackendLevel,
        time: DateTime<Utc>,
        message: impl Into<String>,
        logger_name: impl Into<String>,
    ) -> Self {
        Self {
            level,
            time,
            message: message.into(),
            logger_name: logger_name.into(),
            caller: None,
            stack: None,
        }
    }
}

pub trait Core: Send + Sync {
    fn name(&self) -> &str;

    /// Cheap level query; must not allocate or touch fields.
    fn enabled(&self, level: BackendLevel) -> bool;

    /// Admit an entry for writing, or decline it with `None`.
    fn check(&self, entry: Entry) -> Option<Entry> {
        if self.enabled(entry.level) {
            Some(entry)
        } else {
            None
        }
    }

    /// A core that prepends `fields` to every future write.
    fn with(&self, fields: Vec<Field>) -> Arc<dyn Core>;

    fn write(&self, entry: &Entry, fields: Vec<Field>) -> Result<()>;

    /// Flush buffered output.
    fn sync(&self) -> Result<()> {
        Ok(())
    }
}
