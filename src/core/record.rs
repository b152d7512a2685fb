//! Log record structure

use super::attribute::Attr;
use super::caller::CallSite;
use super::log_level::Level;
use chrono::{DateTime, Utc};

/// Snapshot of one log call. Built per call and consumed by `Handler::handle`.
#[derive(Debug, Clone)]
pub struct Record {
    pub level: Level,
    pub message: String,
    pub time: DateTime<Utc>,
    pub caller: Option<CallSite>,
    attrs: Vec<Attr>,
}

impl Record {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            time: Utc::now(),
            caller: None,
            attrs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_caller(mut self, caller: CallSite) -> Self {
        self.caller = Some(caller);
        self
    }

    #[must_use]
    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    #[must_use]
    pub fn with_attrs<I>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = Attr>,
    {
        self.attrs.extend(attrs);
        self
    }

    pub fn add_attr(&mut self, attr: Attr) {
        self.attrs.push(attr);
    }

    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    pub fn num_attrs(&self) -> usize {
        self.attrs.len()
    }

    pub(crate) fn into_attrs(self) -> Vec<Attr> {
        self.attrs
    }
}
