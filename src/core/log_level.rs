//! Log level definitions and the facade-to-backend level mapping

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity as seen by application code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

/// Severity as understood by a backend core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    /// Map to the backend severity.
    ///
    /// Trace has no backend counterpart and folds into `Debug`. Fatal maps to
    /// the highest backend severity; it never terminates the process.
    #[inline]
    pub const fn to_backend(self) -> BackendLevel {
        match self {
            Level::Trace | Level::Debug => BackendLevel::Debug,
            Level::Info => BackendLevel::Info,
            Level::Warn => BackendLevel::Warn,
            Level::Error => BackendLevel::Error,
            Level::Fatal => BackendLevel::Fatal,
        }
    }
}

impl BackendLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendLevel::Debug => "debug",
            BackendLevel::Info => "info",
            BackendLevel::Warn => "warn",
            BackendLevel::Error => "error",
            BackendLevel::Fatal => "fatal",
        }
    }
}

impl From<Level> for BackendLevel {
    fn from(level: Level) -> Self {
        level.to_backend()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl fmt::Display for BackendLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(Level::Trace),
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "ERROR" => Ok(Level::Error),
            "FATAL" => Ok(Level::Fatal),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}
