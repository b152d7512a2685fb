//! Logging macros for ergonomic record construction.
//!
//! Each macro takes a logger, then either `format!`-style arguments or a
//! message followed by `;` and `key => value` attribute pairs. The call site
//! (`file!`, `line!`, `module_path!`) is captured automatically, and nothing
//! is built when the level is disabled.
//!
//! # Examples
//!
//! ```
//! use rust_log_bridge::prelude::*;
//! use rust_log_bridge::info;
//!
//! let logger = Logger::new(Logger::builder(ObservedCore::new(Level::Debug)).build());
//!
//! // Formatted message
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // Message with attributes
//! info!(logger, "request served"; "status" => 200, "path" => "/health");
//! ```

/// Log at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_log_bridge::prelude::*;
/// # let logger = Logger::new(Logger::builder(ObservedCore::new(Level::Debug)).build());
/// use rust_log_bridge::log;
/// log!(logger, Level::Info, "Simple message");
/// log!(logger, Level::Error, "Error code: {}", 500);
/// log!(logger, Level::Warn, "retrying"; "attempt" => 3);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log_at(
                level,
                ::core::option::Option::Some($crate::CallSite::new(
                    file!(),
                    line!(),
                    ::core::option::Option::Some(module_path!()),
                )),
                $msg,
                [$($crate::Attr::new($key, $value)),+],
            );
        } else {
            logger.metrics().record_filtered();
        }
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log_at(
                level,
                ::core::option::Option::Some($crate::CallSite::new(
                    file!(),
                    line!(),
                    ::core::option::Option::Some(module_path!()),
                )),
                format!($($arg)+),
                ::std::iter::empty::<$crate::Attr>(),
            );
        } else {
            logger.metrics().record_filtered();
        }
    }};
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_bridge::prelude::*;
/// # let logger = Logger::new(Logger::builder(ObservedCore::new(Level::Debug)).build());
/// use rust_log_bridge::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log a fatal-level message. The process keeps running.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Fatal, $($arg)+)
    };
}
