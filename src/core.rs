use crate::entry::{CheckedEntry, Entry};
use crate::error::CoreError;
use crate::field::Field;
use crate::level::Level;

/// Back-end stage of a structured logging pipeline.
///
/// A core decides which levels it accepts, carries a set of static fields,
/// and writes entries somewhere. Cores are composed by wrapping: a decorator
/// holds another `Box<dyn Core>` and delegates to it.
pub trait Core: Send + Sync {
    /// Whether entries at `level` would be written.
    fn enabled(&self, level: Level) -> bool;

    /// Derive a new core with `fields` appended to its static fields.
    ///
    /// The receiver must not observe the new fields.
    fn with(&self, fields: Vec<Field>) -> Box<dyn Core>;

    /// Register this core on `ce` if it wants to write `entry`.
    ///
    /// Implementations are almost always
    /// `if self.enabled(entry.level) { ce.add_core(self) } else { ce }`.
    fn check<'a>(&'a self, entry: &Entry, ce: CheckedEntry<'a>) -> CheckedEntry<'a>;

    /// Write an entry with the per-call `fields`.
    ///
    /// Static fields are the core's own business; callers only pass what was
    /// given at the logging call site.
    fn write(&self, entry: &Entry, fields: Vec<Field>) -> Result<(), CoreError>;

    /// Flush buffered entries, if the core buffers.
    ///
    /// Default implementation is a no-op.
    fn sync(&self) -> Result<(), CoreError> {
        Ok(())
    }
}
