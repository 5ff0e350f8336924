use std::io::Write;

use chrono::SecondsFormat;
use tracing_subscriber::fmt::MakeWriter;

use crate::core::Core;
use crate::entry::{CheckedEntry, Entry};
use crate::error::CoreError;
use crate::field::{fields_to_json, Field};
use crate::level::Level;

/// [`Core`] that formats each entry as one line into a writer.
///
/// Line layout: `<rfc3339 time> <LEVEL> <logger>: <message> <fields as JSON>`,
/// followed by the stack trace when the entry has one. Static fields added
/// with [`Core::with`] and the call's fields share the JSON object.
///
/// Unlike [`TracingCore`](crate::tracing_core::TracingCore) it does not go
/// back through the `tracing` dispatcher, so it is the core to wrap when
/// entries arrive through a [`CoreLayer`](crate::layer::CoreLayer).
pub struct WriterCore<M> {
    min_level: Level,
    make_writer: M,
    fields: Vec<Field>,
}

impl<M> WriterCore<M>
where
    M: for<'w> MakeWriter<'w> + Clone + Send + Sync + 'static,
{
    /// **Parameters**
    /// - `min_level`: lowest level written.
    /// - `make_writer`: any `tracing_subscriber` writer factory, e.g.
    ///   `std::io::stdout` or a `tracing_appender` non-blocking writer.
    pub fn new(min_level: Level, make_writer: M) -> Self {
        WriterCore {
            min_level,
            make_writer,
            fields: Vec::new(),
        }
    }

    fn format(&self, entry: &Entry, fields: &[Field]) -> String {
        let mut line = format!(
            "{} {:>6} {}: {}",
            entry.time.to_rfc3339_opts(SecondsFormat::Micros, true),
            entry.level.to_string().to_uppercase(),
            entry.target,
            entry.message,
        );
        if !fields.is_empty() {
            line.push(' ');
            line.push_str(&fields_to_json(fields).to_string());
        }
        line.push('\n');
        if !entry.stack.is_empty() {
            line.push_str(&entry.stack);
            if !entry.stack.ends_with('\n') {
                line.push('\n');
            }
        }
        line
    }
}

impl<M> Core for WriterCore<M>
where
    M: for<'w> MakeWriter<'w> + Clone + Send + Sync + 'static,
{
    fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    fn with(&self, fields: Vec<Field>) -> Box<dyn Core> {
        let mut combined = self.fields.clone();
        combined.extend(fields);
        Box::new(WriterCore {
            min_level: self.min_level,
            make_writer: self.make_writer.clone(),
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
        let line = self.format(entry, &all);

        self.make_writer
            .make_writer()
            .write_all(line.as_bytes())
            .map_err(|e| CoreError::Write(e.to_string()))
    }

    fn sync(&self) -> Result<(), CoreError> {
        self.make_writer
            .make_writer()
            .flush()
            .map_err(|e| CoreError::Sync(e.to_string()))
    }
}
