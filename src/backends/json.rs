//! JSON-lines backend core

use crate::core::{fields_to_json, BackendLevel, Core, Entry, Field, LoggerError, Result};
use chrono::SecondsFormat;
use parking_lot::Mutex;
use serde_json::{Map, Value as JsonValue};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Writes each admitted entry as a single-line JSON object (JSONL format)
///
/// Compatible with log aggregation tools like ELK, Loki, etc. Entry metadata
/// uses the keys `time`, `level`, `logger`, `caller`, `message` and
/// `stacktrace`; fields go alongside them, nested under namespaces.
///
/// Key collisions: metadata keys overwrite top-level fields of the same name,
/// and a namespace object overwrites an earlier field named like the group.
#[derive(Clone)]
pub struct JsonCore {
    writer: SharedWriter,
    level: BackendLevel,
    bound: Arc<Vec<Field>>,
}

impl JsonCore {
    pub fn new<W: Write + Send + 'static>(writer: W, level: impl Into<BackendLevel>) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
            level: level.into(),
            bound: Arc::new(Vec::new()),
        }
    }

    pub fn stdout(level: impl Into<BackendLevel>) -> Self {
        Self::new(std::io::stdout(), level)
    }

    /// Append to the file at `path`, creating it if needed
    pub fn file<P: AsRef<Path>>(path: P, level: impl Into<BackendLevel>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;

        Ok(Self::new(BufWriter::new(file), level))
    }

    fn encode(&self, entry: &Entry, fields: Vec<Field>) -> Result<String> {
        let mut all = Vec::with_capacity(self.bound.len() + fields.len());
        all.extend(self.bound.iter().cloned());
        all.extend(fields);

        let mut object: Map<String, JsonValue> = fields_to_json(&all);

        object.insert(
            "time".to_string(),
            JsonValue::String(entry.time.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        object.insert(
            "level".to_string(),
            JsonValue::String(entry.level.as_str().to_string()),
        );
        if !entry.logger_name.is_empty() {
            object.insert(
                "logger".to_string(),
                JsonValue::String(entry.logger_name.clone()),
            );
        }
        if let Some(caller) = &entry.caller {
            object.insert(
                "caller".to_string(),
                JsonValue::String(format!("{}:{}", caller.file, caller.line)),
            );
        }
        object.insert(
            "message".to_string(),
            JsonValue::String(entry.message.clone()),
        );
        if let Some(stack) = &entry.stack {
            object.insert("stacktrace".to_string(), JsonValue::String(stack.clone()));
        }

        Ok(serde_json::to_string(&JsonValue::Object(object))?)
    }
}

impl Core for JsonCore {
    fn name(&self) -> &str {
        "json"
    }

    fn enabled(&self, level: BackendLevel) -> bool {
        level >= self.level
    }

    fn with(&self, fields: Vec<Field>) -> Arc<dyn Core> {
        let mut bound = Vec::with_capacity(self.bound.len() + fields.len());
        bound.extend(self.bound.iter().cloned());
        bound.extend(fields);
        Arc::new(Self {
            writer: Arc::clone(&self.writer),
            level: self.level,
            bound: Arc::new(bound),
        })
    }

    fn write(&self, entry: &Entry, fields: Vec<Field>) -> Result<()> {
        let line = self.encode(entry, fields)?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)
            .map_err(|e| LoggerError::io_operation("writing log entry", "json sink rejected write", e))
    }

    fn sync(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }
}
