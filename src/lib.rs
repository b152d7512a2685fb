//! # Rust Log Bridge
//!
//! A structured logging facade. Application code emits leveled records with
//! typed attributes through a small [`Logger`] interface; a [`CoreHandler`]
//! converts those attributes into backend [`Field`]s and hands them to a
//! pluggable backend [`Core`] that decides admission and does the writing.
//!
//! ## Features
//!
//! - **Typed attributes**: scalars, durations, times, serializable values,
//!   nested groups and lazily computed values
//! - **Groups**: `with_group` nests later fields under a namespace
//! - **Immutable derivation**: `with`/`with_group` return new loggers, safe to
//!   fan out across threads
//! - **Redaction hook**: rewrite or mask attributes before they are emitted
//!
//! ```
//! use rust_log_bridge::prelude::*;
//!
//! let core = ObservedCore::new(Level::Info);
//! let logger = Logger::new(Logger::builder(core.clone()).build());
//!
//! logger
//!     .with_group("req")
//!     .warn("slow request", [Attr::int64("latency_ms", 912)]);
//!
//! assert_eq!(core.len(), 1);
//! ```
//!
//! ## Passing loggers around
//!
//! There is no ambient or task-local logger slot: a [`Logger`] is a cheap,
//! cloneable value handed to code explicitly, as an argument or a struct field.
//!
//! ```
//! use rust_log_bridge::prelude::*;
//!
//! fn charge(logger: &Logger, amount: f64) {
//!     logger.info("charged", [Attr::float64("amount", amount)]);
//! }
//!
//! let core = ObservedCore::new(Level::Info);
//! let root = Logger::new(Logger::builder(core.clone()).build());
//! charge(&root.with([Attr::string("request_id", "r-1")]), 9.5);
//!
//! assert_eq!(core.entries()[0].context_json()["request_id"], "r-1");
//! ```

pub mod backends;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::backends::{JsonCore, ObservedCore, ObservedEntry};
    pub use crate::core::{
        prefix_redactor, Attr, BackendLevel, CallSite, Core, CoreHandler, Entry, Field,
        FieldValue, Handler, HandlerBuilder, Kind, Level, LogValuer, LogWriter, Logger,
        LoggerConfig, LoggerError, LoggerMetrics, LoggerRegistry, Record, ReplaceAttr, Result,
        Value,
    };
}

pub use backends::{JsonCore, ObservedCore, ObservedEntry};
pub use core::{
    capture_stacktrace, convert, convert_all, fields_to_json, prefix_redactor, Attr, BackendLevel,
    CallSite, CallSiteResolver, CallerResolver, Converted, Core, CoreHandler, Entry, Field,
    FieldValue, Frame, GroupStack, Handler, HandlerBuilder, Kind, Level, LogValuer, LogWriter,
    Logger, LoggerConfig, LoggerError, LoggerMetrics, LoggerRegistry, NamespaceTracker, Record,
    ReplaceAttr, Result, Value, MAX_LAZY_RESOLUTIONS, REDACTED,
};
