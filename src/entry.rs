use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::Core;
use crate::error::{CoreError, WriteError};
use crate::field::Field;
use crate::level::Level;

/// Metadata of a single logging call.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub level: Level,
    pub time: DateTime<Utc>,
    /// Logger name; `tracing` targets land here.
    pub target: String,
    pub message: String,
    /// Rendered stack trace, empty when none was captured.
    pub stack: String,
}

impl Entry {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Entry {
            level,
            time: Utc::now(),
            target: String::new(),
            message: message.into(),
            stack: String::new(),
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = stack.into();
        self
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }
}

/// An entry together with the cores that agreed to write it.
///
/// Built by [`Core::check`]: each enabled core registers itself, and a single
/// [`CheckedEntry::write`] then reaches all of them.
pub struct CheckedEntry<'a> {
    entry: Entry,
    cores: Vec<&'a dyn Core>,
}

impl<'a> CheckedEntry<'a> {
    pub fn new(entry: Entry) -> Self {
        CheckedEntry { entry, cores: Vec::new() }
    }

    pub fn add_core(mut self, core: &'a dyn Core) -> Self {
        self.cores.push(core);
        self
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    /// `true` when no core accepted the entry.
    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cores.len()
    }

    /// Write the entry to every registered core.
    ///
    /// Each core gets its own copy of `fields`. A failing core does not stop
    /// the remaining ones.
    pub fn write(self, fields: &[Field]) -> Result<(), WriteError> {
        let errors: Vec<CoreError> = self
            .cores
            .iter()
            .filter_map(|core| core.write(&self.entry, fields.to_vec()).err())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(WriteError { errors })
        }
    }
}
