//! Named logger registry
//!
//! An explicit value owned by the application (no process-wide global). Each
//! name is created at most once, even under concurrent first access.

use super::logger::Logger;
use parking_lot::RwLock;
use std::collections::HashMap;

pub struct LoggerRegistry {
    root: Logger,
    loggers: RwLock<HashMap<String, Logger>>,
}

impl LoggerRegistry {
    pub fn new(root: Logger) -> Self {
        Self {
            root,
            loggers: RwLock::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Logger {
        &self.root
    }

    /// Named child of the root, created on first use
    pub fn get(&self, name: &str) -> Logger {
        self.get_or_init(name, |root| root.named(name))
    }

    /// Return the logger registered under `name`, building it with `init`
    /// if absent. `init` runs at most once per name.
    pub fn get_or_init<F>(&self, name: &str, init: F) -> Logger
    where
        F: FnOnce(&Logger) -> Logger,
    {
        if let Some(logger) = self.loggers.read().get(name) {
            return logger.clone();
        }

        let mut loggers = self.loggers.write();
        // Another thread may have won the race between the two locks
        if let Some(logger) = loggers.get(name) {
            return logger.clone();
        }
        let logger = init(&self.root);
        loggers.insert(name.to_string(), logger.clone());
        logger
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loggers.read().contains_key(name)
    }

    pub fn remove(&self, name: &str) -> Option<Logger> {
        self.loggers.write().remove(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::ObservedCore;
    use crate::core::log_level::BackendLevel;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    fn registry() -> (ObservedCore, LoggerRegistry) {
        let core = ObservedCore::new(BackendLevel::Debug);
        let root = Logger::new(Logger::builder(core.clone()).name("app").build());
        (core, LoggerRegistry::new(root))
    }

    #[test]
    fn test_get_names_child() {
        let (core, registry) = registry();
        let db = registry.get("db");
        db.info("connected", []);

        assert_eq!(db.name(), "app.db");
        assert_eq!(core.entries()[0].entry.logger_name, "app.db");
        assert_eq!(registry.names(), vec!["db".to_string()]);
    }

    #[test]
    fn test_get_returns_same_logger() {
        let (_, registry) = registry();
        let first = registry.get("cache");
        let second = registry.get("cache");
        assert!(first.handler().same_as(second.handler()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_concurrent_first_creation_runs_init_once() {
        let (_, registry) = registry();
        let registry = Arc::new(registry);
        let inits = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let inits = Arc::clone(&inits);
                thread::spawn(move || {
                    registry.get_or_init("worker", |root| {
                        inits.fetch_add(1, Ordering::SeqCst);
                        root.named("worker")
                    })
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(inits.load(Ordering::SeqCst), 1);
        assert!(registry.contains("worker"));
    }

    #[test]
    fn test_remove() {
        let (_, registry) = registry();
        registry.get("tmp");
        assert!(registry.remove("tmp").is_some());
        assert!(registry.is_empty());
    }
}
