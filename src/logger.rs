use std::backtrace::Backtrace;
use std::sync::Arc;

use crate::core::Core;
use crate::entry::{CheckedEntry, Entry};
use crate::error::{CoreError, WriteError};
use crate::field::Field;
use crate::level::Level;

/// Cheap, cloneable handle for logging through a [`Core`].
///
/// ```
/// use sentry_log_sink::{field::Field, logger::Logger, noop_core::NoopCore};
///
/// let logger = Logger::new(Box::new(NoopCore)).named("billing");
/// let request_logger = logger.with(vec![Field::str("request_id", "r-1")]);
/// request_logger.info("charge accepted", vec![Field::u64("cents", 1250)]);
/// ```
#[derive(Clone)]
pub struct Logger {
    core: Arc<dyn Core>,
    name: String,
    stacktrace_level: Option<Level>,
}

impl Logger {
    pub fn new(core: Box<dyn Core>) -> Self {
        Logger {
            core: Arc::from(core),
            name: String::new(),
            stacktrace_level: None,
        }
    }

    /// Logger name reported as the entry target.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Capture a stack trace for entries at or above `level`.
    pub fn with_stacktrace(mut self, level: Level) -> Self {
        self.stacktrace_level = Some(level);
        self
    }

    pub fn core(&self) -> &dyn Core {
        self.core.as_ref()
    }

    /// Child logger whose core carries `fields` on every entry.
    pub fn with(&self, fields: Vec<Field>) -> Logger {
        Logger {
            core: Arc::from(self.core.with(fields)),
            name: self.name.clone(),
            stacktrace_level: self.stacktrace_level,
        }
    }

    /// Build the entry for `level` and ask the core who wants it.
    ///
    /// Returns `None` when nothing would write it, so callers can skip
    /// building expensive fields.
    pub fn check(&self, level: Level, message: impl Into<String>) -> Option<CheckedEntry<'_>> {
        if !self.core.enabled(level) {
            return None;
        }

        let mut entry = Entry::new(level, message).with_target(self.name.clone());
        if self.stacktrace_level.is_some_and(|min| level >= min) {
            entry = entry.with_stack(Backtrace::force_capture().to_string());
        }

        let checked = self.core.check(&entry, CheckedEntry::new(entry.clone()));
        if checked.is_empty() {
            None
        } else {
            Some(checked)
        }
    }

    /// Log at `level`, returning the cores' write errors.
    pub fn try_log(
        &self,
        level: Level,
        message: impl Into<String>,
        fields: Vec<Field>,
    ) -> Result<(), WriteError> {
        match self.check(level, message) {
            Some(checked) => checked.write(&fields),
            None => Ok(()),
        }
    }

    /// Log at `level`. Write failures are reported on stderr.
    pub fn log(&self, level: Level, message: impl Into<String>, fields: Vec<Field>) {
        if let Err(e) = self.try_log(level, message, fields) {
            eprintln!("error writing log entry: {}", e);
        }
    }

    pub fn debug(&self, message: impl Into<String>, fields: Vec<Field>) {
        self.log(Level::DEBUG, message, fields);
    }

    pub fn info(&self, message: impl Into<String>, fields: Vec<Field>) {
        self.log(Level::INFO, message, fields);
    }

    pub fn warn(&self, message: impl Into<String>, fields: Vec<Field>) {
        self.log(Level::WARN, message, fields);
    }

    pub fn error(&self, message: impl Into<String>, fields: Vec<Field>) {
        self.log(Level::ERROR, message, fields);
    }

    pub fn sync(&self) -> Result<(), CoreError> {
        self.core.sync()
    }
}
