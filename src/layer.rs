use crate::core::Core;
use crate::entry::{CheckedEntry, Entry};
use crate::field::Field;
use crate::level::Level;
use tracing::field::{Field as TracingField, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// `tracing_subscriber` layer that routes events through a [`Core`].
///
/// Each event becomes an [`Entry`] (the `message` field is the entry message,
/// the event target is the logger name) and its other fields become
/// [`Field`]s. The core's `check` decides whether the entry is written.
///
/// The core runs inside the subscriber's dispatch, where `tracing` drops any
/// nested events. Put a [`WriterCore`](crate::writer_core::WriterCore) behind
/// this layer, not a [`TracingCore`](crate::tracing_core::TracingCore).
pub struct CoreLayer {
    core: Box<dyn Core>,
}

impl CoreLayer {
    pub fn new(core: Box<dyn Core>) -> Self {
        CoreLayer { core }
    }

    pub fn core(&self) -> &dyn Core {
        self.core.as_ref()
    }
}

impl<S> Layer<S> for CoreLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let level = Level::from(*meta.level());
        if !self.core.enabled(level) {
            return;
        }

        let mut fields = Vec::new();
        let mut message: Option<String> = None;

        let mut visitor = FieldVisitor {
            fields: &mut fields,
            message: &mut message,
        };
        event.record(&mut visitor);

        let entry = Entry::new(level, message.unwrap_or_default()).with_target(meta.target());
        let checked = self.core.check(&entry, CheckedEntry::new(entry.clone()));

        if let Err(e) = checked.write(&fields) {
            eprintln!("error writing log entry: {}", e);
        }
    }
}

/// Collects `tracing` event fields as typed [`Field`]s.
pub struct FieldVisitor<'a> {
    pub fields: &'a mut Vec<Field>,
    pub message: &'a mut Option<String>,
}

impl<'a> Visit for FieldVisitor<'a> {
    fn record_str(&mut self, field: &TracingField, value: &str) {
        if field.name() == "message" {
            *self.message = Some(value.to_string());
        } else {
            self.fields.push(Field::str(field.name(), value));
        }
    }

    fn record_i64(&mut self, field: &TracingField, value: i64) {
        self.fields.push(Field::i64(field.name(), value));
    }

    fn record_u64(&mut self, field: &TracingField, value: u64) {
        self.fields.push(Field::u64(field.name(), value));
    }

    fn record_f64(&mut self, field: &TracingField, value: f64) {
        self.fields.push(Field::f64(field.name(), value));
    }

    fn record_bool(&mut self, field: &TracingField, value: bool) {
        self.fields.push(Field::bool(field.name(), value));
    }

    fn record_error(&mut self, field: &TracingField, value: &(dyn std::error::Error + 'static)) {
        self.fields.push(Field::str(field.name(), value.to_string()));
    }

    fn record_debug(&mut self, field: &TracingField, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.message = Some(format!("{:?}", value));
        } else {
            self.fields.push(Field::str(field.name(), format!("{:?}", value)));
        }
    }
}
