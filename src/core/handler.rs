//! Handler contract and the adapter onto a backend [`Core`]

use super::attribute::Attr;
use super::backend::{Core, Entry};
use super::caller::{capture_stacktrace, CallSiteResolver, CallerResolver};
use super::convert::convert;
use super::error::Result;
use super::field::Field;
use super::group::{GroupStack, NamespaceTracker};
use super::log_level::Level;
use super::record::Record;
use std::fmt;
use std::sync::Arc;

/// Hook applied to every attribute before conversion.
///
/// Receives every open group name (outermost first) and the attribute, and
/// returns the attribute to emit in its place.
pub type ReplaceAttr = Arc<dyn Fn(&[String], Attr) -> Attr + Send + Sync>;

/// What a logger needs from whatever turns records into output.
///
/// Derivations never mutate the receiver; they return a new handler value.
pub trait Handler: Send + Sync {
    fn enabled(&self, level: Level) -> bool;

    fn handle(&self, record: Record) -> Result<()>;

    fn with_attrs(&self, attrs: Vec<Attr>) -> Self
    where
        Self: Sized;

    fn with_group(&self, name: &str) -> Self
    where
        Self: Sized;
}

/// Handler that converts attributes into [`Field`]s and forwards them to a
/// shared backend core.
#[derive(Clone)]
pub struct CoreHandler {
    core: Arc<dyn Core>,
    groups: GroupStack,
    name: Arc<str>,
    add_caller: bool,
    add_stacktrace_at: Option<Level>,
    caller_skip: usize,
    replace_attr: Option<ReplaceAttr>,
    resolver: Arc<dyn CallerResolver>,
}

impl CoreHandler {
    pub fn new<C: Core + 'static>(core: C) -> Self {
        Self::builder(core).build()
    }

    pub fn builder<C: Core + 'static>(core: C) -> HandlerBuilder {
        HandlerBuilder::new(Arc::new(core))
    }

    pub fn from_shared(core: Arc<dyn Core>) -> HandlerBuilder {
        HandlerBuilder::new(core)
    }

    pub fn core(&self) -> &Arc<dyn Core> {
        &self.core
    }

    pub fn groups(&self) -> &GroupStack {
        &self.groups
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Derive a handler with a dotted child name (`parent.child`).
    #[must_use]
    pub fn named(&self, name: &str) -> Self {
        if name.is_empty() {
            return self.clone();
        }
        let mut derived = self.clone();
        derived.name = if self.name.is_empty() {
            Arc::from(name)
        } else {
            Arc::from(format!("{}.{}", self.name, name))
        };
        derived
    }

    /// True when `other` shares this handler's core and group stack.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.core, &other.core) && self.groups.ptr_eq(&other.groups)
    }

    pub fn sync(&self) -> Result<()> {
        self.core.sync()
    }

    /// Redact, resolve and convert one call's attributes. The flag reports
    /// whether the pending namespace was emitted.
    fn build_fields<I>(&self, attrs: I, capacity: usize) -> (Vec<Field>, bool)
    where
        I: IntoIterator<Item = Attr>,
    {
        let mut tracker = NamespaceTracker::new(self.groups.pending(), capacity);
        for attr in attrs {
            let attr = match &self.replace_attr {
                Some(replace) => replace(self.groups.names(), attr),
                None => attr,
            };
            tracker.push(convert(attr));
        }
        let opened = tracker.opened();
        (tracker.into_fields(), opened)
    }
}

impl Handler for CoreHandler {
    #[inline]
    fn enabled(&self, level: Level) -> bool {
        self.core.enabled(level.to_backend())
    }

    fn handle(&self, mut record: Record) -> Result<()> {
        let entry = Entry::new(
            record.level.to_backend(),
            record.time,
            std::mem::take(&mut record.message),
            self.name.as_ref(),
        );
        let Some(mut entry) = self.core.check(entry) else {
            return Ok(());
        };

        if self.add_caller {
            if let Some(site) = record.caller.as_ref() {
                entry.caller = self.resolver.resolve(site);
            }
        }
        if self.add_stacktrace_at.is_some_and(|at| record.level >= at) {
            entry.stack = Some(capture_stacktrace(self.caller_skip));
        }

        let capacity = record.num_attrs();
        let (fields, _) = self.build_fields(record.into_attrs(), capacity);
        self.core.write(&entry, fields)
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Self {
        if attrs.is_empty() {
            return self.clone();
        }

        let capacity = attrs.len();
        let (fields, opened) = self.build_fields(attrs, capacity);
        if fields.is_empty() {
            return self.clone();
        }

        let mut derived = self.clone();
        derived.core = self.core.with(fields);
        if opened {
            derived.groups = self.groups.mark_opened();
        }
        derived
    }

    fn with_group(&self, name: &str) -> Self {
        if name.is_empty() {
            return self.clone();
        }
        let mut derived = self.clone();
        derived.groups = self.groups.push(name);
        derived
    }
}

impl fmt::Debug for CoreHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreHandler")
            .field("core", &self.core.name())
            .field("groups", &self.groups.names())
            .field("name", &self.name)
            .field("add_caller", &self.add_caller)
            .field("add_stacktrace_at", &self.add_stacktrace_at)
            .field("caller_skip", &self.caller_skip)
            .field("replace_attr", &self.replace_attr.is_some())
            .finish()
    }
}

/// Builder for [`CoreHandler`]
///
/// Defaults: empty name, no caller, stack traces from `Error` up, no frames
/// skipped, no attribute hook.
pub struct HandlerBuilder {
    core: Arc<dyn Core>,
    name: String,
    add_caller: bool,
    add_stacktrace_at: Option<Level>,
    caller_skip: usize,
    replace_attr: Option<ReplaceAttr>,
    resolver: Arc<dyn CallerResolver>,
}

impl HandlerBuilder {
    pub fn new(core: Arc<dyn Core>) -> Self {
        Self {
            core,
            name: String::new(),
            add_caller: false,
            add_stacktrace_at: Some(Level::Error),
            caller_skip: 0,
            replace_attr: None,
            resolver: Arc::new(CallSiteResolver),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach the resolved call site to every admitted entry
    #[must_use = "builder methods return a new value"]
    pub fn add_caller(mut self, add: bool) -> Self {
        self.add_caller = add;
        self
    }

    /// Capture a stack trace for records at or above `level`
    #[must_use = "builder methods return a new value"]
    pub fn add_stacktrace_at(mut self, level: Level) -> Self {
        self.add_stacktrace_at = Some(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn without_stacktrace(mut self) -> Self {
        self.add_stacktrace_at = None;
        self
    }

    /// Number of leading frames dropped from captured stack traces
    #[must_use = "builder methods return a new value"]
    pub fn caller_skip(mut self, skip: usize) -> Self {
        self.caller_skip = skip;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn replace_attr(mut self, hook: ReplaceAttr) -> Self {
        self.replace_attr = Some(hook);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller_resolver(mut self, resolver: Arc<dyn CallerResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn build(self) -> CoreHandler {
        CoreHandler {
            core: self.core,
            groups: GroupStack::new(),
            name: Arc::from(self.name),
            add_caller: self.add_caller,
            add_stacktrace_at: self.add_stacktrace_at,
            caller_skip: self.caller_skip,
            replace_attr: self.replace_attr,
            resolver: self.resolver,
        }
    }
}
