//! Core bridge types and traits

pub mod attribute;
pub mod backend;
pub mod caller;
pub mod config;
pub mod convert;
pub mod error;
pub mod field;
pub mod group;
pub mod handler;
pub mod log_level;
pub mod log_writer;
pub mod logger;
pub mod metrics;
pub mod record;
pub mod redact;
pub mod registry;

pub use attribute::{Attr, Kind, LogValuer, Value, MAX_LAZY_RESOLUTIONS};
pub use backend::{Core, Entry};
pub use caller::{capture_stacktrace, CallSite, CallSiteResolver, CallerResolver, Frame};
pub use config::LoggerConfig;
pub use convert::{convert, convert_all, Converted};
pub use error::{LoggerError, Result};
pub use field::{fields_to_json, Field, FieldValue};
pub use group::{GroupStack, NamespaceTracker};
pub use handler::{CoreHandler, Handler, HandlerBuilder, ReplaceAttr};
pub use log_level::{BackendLevel, Level};
pub use log_writer::LogWriter;
pub use logger::Logger;
pub use metrics::LoggerMetrics;
pub use record::Record;
pub use redact::{prefix_redactor, REDACTED};
pub use registry::LoggerRegistry;
