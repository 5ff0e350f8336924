use crate::core::Core;
use crate::entry::{CheckedEntry, Entry};
use crate::error::CoreError;
use crate::field::{fields_to_json, Field};
use crate::level::Level;

/// Target of the `tracing` events emitted by [`TracingCore`].
pub const TRACING_CORE_TARGET: &str = "sentry_log_sink::core";

/// [`Core`] that writes entries as `tracing` events.
///
/// Whatever subscriber is installed does the formatting and output. Fields
/// (static ones first) are rendered as a single JSON object in the `fields`
/// field; the entry's logger name goes to `logger`.
///
/// Use it from a [`Logger`](crate::logger::Logger). Behind a
/// [`CoreLayer`](crate::layer::CoreLayer) its events would be emitted during
/// another event's dispatch and `tracing` would drop them.
#[derive(Clone, Debug)]
pub struct TracingCore {
    min_level: Level,
    fields: Vec<Field>,
}

impl TracingCore {
    pub fn new(min_level: Level) -> Self {
        TracingCore {
            min_level,
            fields: Vec::new(),
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

impl Default for TracingCore {
    fn default() -> Self {
        TracingCore::new(Level::DEBUG)
    }
}

macro_rules! emit {
    ($level:expr, $logger:ident, $fields:ident, $stack:ident, $message:ident) => {
        if $stack.is_empty() {
            tracing::event!(
                target: TRACING_CORE_TARGET,
                $level,
                logger = %$logger,
                fields = %$fields,
                "{}",
                $message
            )
        } else {
            tracing::event!(
                target: TRACING_CORE_TARGET,
                $level,
                logger = %$logger,
                fields = %$fields,
                stacktrace = %$stack,
                "{}",
                $message
            )
        }
    };
}

impl Core for TracingCore {
    fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    fn with(&self, fields: Vec<Field>) -> Box<dyn Core> {
        let mut combined = self.fields.clone();
        combined.extend(fields);
        Box::new(TracingCore {
            min_level: self.min_level,
            fields: combined,
        })
    }

    fn check<'a>(&'a self, entry: &Entry, ce: CheckedEntry<'a>) -> CheckedEntry<'a> {
        if self.enabled(entry.level) {
            ce.add_core(self)
        } else {
            ce
        }
    }

    fn write(&self, entry: &Entry, fields: Vec<Field>) -> Result<(), CoreError> {
        let mut all = self.fields.clone();
        all.extend(fields);
        let rendered = fields_to_json(&all);
        let (logger, stack, message) = (&entry.target, &entry.stack, &entry.message);

        // Panic-class and custom levels above ERROR still log as ERROR.
        match entry.level {
            l if l < Level::DEBUG => emit!(tracing::Level::TRACE, logger, rendered, stack, message),
            Level::DEBUG => emit!(tracing::Level::DEBUG, logger, rendered, stack, message),
            Level::INFO => emit!(tracing::Level::INFO, logger, rendered, stack, message),
            Level::WARN => emit!(tracing::Level::WARN, logger, rendered, stack, message),
            _ => emit!(tracing::Level::ERROR, logger, rendered, stack, message),
        }

        Ok(())
    }
}
