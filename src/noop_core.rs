use crate::core::Core;
use crate::entry::{CheckedEntry, Entry};
use crate::error::CoreError;
use crate::field::Field;
use crate::level::Level;

/// A core that accepts every level and simply drops all entries.
///
/// Useful as the wrapped core when only the forwarding side matters, and for
/// measuring the overhead of a decorator without any output.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopCore;

impl Core for NoopCore {
    fn enabled(&self, _level: Level) -> bool {
        true
    }

    fn with(&self, _fields: Vec<Field>) -> Box<dyn Core> {
        Box::new(NoopCore)
    }

    fn check<'a>(&'a self, _entry: &Entry, ce: CheckedEntry<'a>) -> CheckedEntry<'a> {
        ce.add_core(self)
    }

    fn write(&self, _entry: &Entry, _fields: Vec<Field>) -> Result<(), CoreError> {
        Ok(())
    }
}
