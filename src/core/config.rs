//! Serializable logger configuration
//!
//! Where the configuration comes from (file, environment, CLI) is up to the
//! application; this type only describes it and applies it to a handler.

use super::backend::Core;
use super::error::{LoggerError, Result};
use super::handler::{CoreHandler, HandlerBuilder};
use super::log_level::Level;
use super::logger::Logger;
use super::redact::prefix_redactor;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Minimum level for backends built from this config
    pub level: Level,
    pub name: String,
    /// Attach the call site to each entry
    pub add_source: bool,
    /// `None` disables stack traces
    pub add_stacktrace_at: Option<Level>,
    pub caller_skip: usize,
    /// Key prefixes whose values are masked
    pub secure_fields: Vec<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            name: String::new(),
            add_source: true,
            add_stacktrace_at: Some(Level::Error),
            caller_skip: 1,
            secure_fields: Vec::new(),
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| LoggerError::config("LoggerConfig", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.secure_fields.iter().any(String::is_empty) {
            return Err(LoggerError::config(
                "LoggerConfig",
                "secure_fields must not contain an empty prefix",
            ));
        }
        Ok(())
    }

    /// Handler builder with every option from this config applied
    pub fn handler_builder(&self, core: Arc<dyn Core>) -> HandlerBuilder {
        let mut builder = CoreHandler::from_shared(core)
            .name(self.name.clone())
            .add_caller(self.add_source)
            .caller_skip(self.caller_skip);

        builder = match self.add_stacktrace_at {
            Some(level) => builder.add_stacktrace_at(level),
            None => builder.without_stacktrace(),
        };

        if !self.secure_fields.is_empty() {
            builder = builder.replace_attr(prefix_redactor(self.secure_fields.iter().cloned()));
        }

        builder
    }

    pub fn build_handler(&self, core: Arc<dyn Core>) -> Result<CoreHandler> {
        self.validate()?;
        Ok(self.handler_builder(core).build())
    }

    pub fn build_logger(&self, core: Arc<dyn Core>) -> Result<Logger> {
        Ok(Logger::new(self.build_handler(core)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::ObservedCore;
    use crate::core::attribute::Attr;
    use crate::core::log_level::BackendLevel;
    use crate::core::redact::REDACTED;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.level, Level::Info);
        assert!(config.add_source);
        assert_eq!(config.add_stacktrace_at, Some(Level::Error));
        assert_eq!(config.caller_skip, 1);
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            LoggerConfig::from_json(r#"{"level": "debug", "secure_fields": ["secret_"]}"#).unwrap();
        assert_eq!(config.level, Level::Debug);
        assert_eq!(config.secure_fields, vec!["secret_".to_string()]);
        assert!(config.add_source);
    }

    #[test]
    fn test_from_json_rejects_unknown_and_empty() {
        assert!(matches!(
            LoggerConfig::from_json(r#"{"colour": true}"#),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
        assert!(LoggerConfig::from_json(r#"{"secure_fields": [""]}"#).is_err());
    }

    #[test]
    fn test_secure_fields_install_redactor() {
        let core = ObservedCore::new(BackendLevel::Debug);
        let config = LoggerConfig {
            secure_fields: vec!["secret_".to_string()],
            add_stacktrace_at: None,
            ..LoggerConfig::default()
        };
        let logger = config.build_logger(Arc::new(core.clone())).unwrap();

        logger.info("login", [Attr::string("secret_token", "t"), Attr::string("user", "u")]);

        let entry = &core.entries()[0];
        assert_eq!(
            entry.field("secret_token").map(|f| f.value.clone()),
            Some(crate::core::field::FieldValue::String(REDACTED.to_string()))
        );
        assert!(entry.entry.caller.is_some());
    }
}
