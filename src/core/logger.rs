//! Application-facing logger facade

use super::{
    attribute::Attr,
    backend::Core,
    caller::CallSite,
    error::Result,
    handler::{CoreHandler, Handler, HandlerBuilder},
    log_level::Level,
    metrics::LoggerMetrics,
    record::Record,
};
use std::sync::Arc;

/// Thin facade over a [`Handler`].
///
/// Cloning is cheap, and `with`/`with_group`/`named` return new loggers that
/// share the backend core and metrics with their parent, so per-request child
/// loggers can be derived freely from one root.
#[derive(Clone)]
pub struct Logger<H = CoreHandler> {
    handler: H,
    metrics: Arc<LoggerMetrics>,
}

impl<H: Handler + Clone> Logger<H> {
    #[must_use]
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Get the logger metrics for detailed observability
    ///
    /// Shared with every logger derived from this one.
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    /// Log at `level`, reporting handler failures on stderr
    #[track_caller]
    pub fn log(&self, level: Level, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log_at(level, Some(CallSite::caller()), message, attrs);
    }

    /// Log with an explicit call site
    pub fn log_at(
        &self,
        level: Level,
        caller: Option<CallSite>,
        message: impl Into<String>,
        attrs: impl IntoIterator<Item = Attr>,
    ) {
        if let Err(e) = self.try_log_at(level, caller, message, attrs) {
            eprintln!("[LOGGER ERROR] Handler failed at {}: {}", level, e);
        }
    }

    /// Like [`Logger::log`] but hands the handler error back
    #[track_caller]
    pub fn try_log(
        &self,
        level: Level,
        message: impl Into<String>,
        attrs: impl IntoIterator<Item = Attr>,
    ) -> Result<()> {
        self.try_log_at(level, Some(CallSite::caller()), message, attrs)
    }

    pub fn try_log_at(
        &self,
        level: Level,
        caller: Option<CallSite>,
        message: impl Into<String>,
        attrs: impl IntoIterator<Item = Attr>,
    ) -> Result<()> {
        if !self.handler.enabled(level) {
            self.metrics.record_filtered();
            return Ok(());
        }

        let mut record = Record::new(level, message).with_attrs(attrs);
        record.caller = caller;

        match self.handler.handle(record) {
            Ok(()) => {
                self.metrics.record_logged();
                Ok(())
            }
            Err(e) => {
                self.metrics.record_dropped();
                Err(e)
            }
        }
    }

    #[inline]
    #[track_caller]
    pub fn trace(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::Trace, message, attrs);
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::Debug, message, attrs);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::Info, message, attrs);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::Warn, message, attrs);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::Error, message, attrs);
    }

    /// Log at the highest severity. Does not terminate the process.
    #[inline]
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::Fatal, message, attrs);
    }

    /// Child logger with `attrs` bound to every record
    #[must_use]
    pub fn with(&self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        let attrs: Vec<Attr> = attrs.into_iter().collect();
        if attrs.is_empty() {
            return self.clone();
        }
        Self {
            handler: self.handler.with_attrs(attrs),
            metrics: Arc::clone(&self.metrics),
        }
    }

    #[must_use]
    pub fn with_group(&self, name: &str) -> Self {
        Self {
            handler: self.handler.with_group(name),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

impl Logger<CoreHandler> {
    /// Create a builder for the default handler over `core`
    ///
    /// # Example
    /// ```
    /// use rust_log_bridge::prelude::*;
    ///
    /// let logger = Logger::from(
    ///     Logger::builder(JsonCore::stdout(Level::Debug))
    ///         .add_caller(true)
    ///         .build(),
    /// );
    /// assert!(logger.enabled(Level::Debug));
    /// ```
    #[must_use]
    pub fn builder<C: Core + 'static>(core: C) -> HandlerBuilder {
        CoreHandler::builder(core)
    }

    /// Child logger whose name is `parent.name`
    #[must_use]
    pub fn named(&self, name: &str) -> Self {
        Self {
            handler: self.handler.named(name),
            metrics: Arc::clone(&self.metrics),
        }
    }

    pub fn name(&self) -> &str {
        self.handler.name()
    }

    pub fn flush(&self) -> Result<()> {
        self.handler.sync()
    }
}

impl<H: Handler + Clone> From<H> for Logger<H> {
    fn from(handler: H) -> Self {
        Logger::new(handler)
    }
}
