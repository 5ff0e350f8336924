use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::core::Core;
use crate::entry::{CheckedEntry, Entry};
use crate::error::CoreError;
use crate::field::{Field, FieldValue, HttpRequest};
use crate::level::{tracking_severity, Level};
use crate::options::{CoreConfig, CoreOption};
use crate::request::build_request_summary;
use crate::tracker::{Tracker, TrackingEvent};

/// Key of the field added when the tracker drops an event.
pub const SENTRY_ERROR_KEY: &str = "sentry_error";
const SENTRY_ERROR_MESSAGE: &str = "send event to sentry error";

/// Build a function that wraps any core in a [`SentryCore`].
///
/// The options are resolved once; every wrapped core shares the resulting
/// configuration and the client.
pub fn new_wrapper(
    client: Arc<dyn Tracker>,
    options: impl IntoIterator<Item = CoreOption>,
) -> impl Fn(Box<dyn Core>) -> Box<dyn Core> {
    let config = Arc::new(CoreConfig::from_options(options));
    move |core| {
        Box::new(SentryCore::with_config(core, Arc::clone(&client), Arc::clone(&config)))
            as Box<dyn Core>
    }
}

/// [`Core`] decorator that also submits entries to an error tracker.
///
/// Every entry still reaches the wrapped core with all of its fields. Entries
/// at or above the configured minimum severity are additionally turned into a
/// [`TrackingEvent`]; when a request field is configured, the HTTP request in
/// that field is summarized (minus secret headers) and attached to the event.
pub struct SentryCore {
    inner: Box<dyn Core>,
    client: Arc<dyn Tracker>,
    config: Arc<CoreConfig>,
    fields: Vec<Field>,
}

impl SentryCore {
    pub fn new(
        core: Box<dyn Core>,
        client: Arc<dyn Tracker>,
        options: impl IntoIterator<Item = CoreOption>,
    ) -> Self {
        Self::with_config(core, client, Arc::new(CoreConfig::from_options(options)))
    }

    pub fn with_config(core: Box<dyn Core>, client: Arc<dyn Tracker>, config: Arc<CoreConfig>) -> Self {
        SentryCore {
            inner: core,
            client,
            config,
            fields: Vec::new(),
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Static fields accumulated through [`Core::with`].
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Remove every field under the request field name, keeping the value of
    /// the last one, and encode the remaining fields into an extras map.
    fn split_fields(&self, fields: Vec<Field>) -> (Vec<Field>, Option<FieldValue>, BTreeMap<String, Value>) {
        let mut kept = Vec::with_capacity(fields.len() + 2);
        let mut extra = BTreeMap::new();
        let mut request = None;

        for field in fields {
            if self.config.request_field.as_deref() == Some(field.key.as_str()) {
                request = Some(field.value);
                continue;
            }
            extra.insert(field.key.clone(), field.value.to_json());
            kept.push(field);
        }

        (kept, request, extra)
    }

    fn build_event(
        &self,
        entry: &Entry,
        mut extra: BTreeMap<String, Value>,
        request: Option<&HttpRequest>,
    ) -> TrackingEvent {
        extra.insert("stacktrace".to_string(), Value::String(entry.stack.clone()));

        TrackingEvent {
            message: entry.message.clone(),
            timestamp: entry.time,
            level: tracking_severity(entry.level),
            extra,
            request: request.map(|req| {
                build_request_summary(
                    req,
                    &self.config.secret_headers,
                    self.config.body_context_key.as_deref(),
                )
            }),
        }
    }
}

impl Core for SentryCore {
    fn enabled(&self, level: Level) -> bool {
        self.inner.enabled(level)
    }

    fn with(&self, fields: Vec<Field>) -> Box<dyn Core> {
        let mut combined = Vec::with_capacity(self.fields.len() + fields.len());
        combined.extend_from_slice(&self.fields);
        combined.extend(fields);

        Box::new(SentryCore {
            inner: self.inner.with(Vec::new()),
            client: Arc::clone(&self.client),
            config: Arc::clone(&self.config),
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
        let mut all = Vec::with_capacity(self.fields.len() + fields.len());
        all.extend_from_slice(&self.fields);
        all.extend(fields);

        let (mut fields, request_value, extra) = self.split_fields(all);

        let request = match request_value {
            None => None,
            Some(FieldValue::Request(req)) => {
                if let Some(name) = &self.config.request_field {
                    fields.push(Field::shared_request(name.clone(), Arc::clone(&req)));
                }
                Some(req)
            }
            Some(other) => return Err(CoreError::WrongRequestType(format!("{other:?}"))),
        };

        if self.config.forwards(entry.level) {
            let event = self.build_event(entry, extra, request.as_deref());
            if self.client.submit(event).is_none() {
                fields.push(Field::str(SENTRY_ERROR_KEY, SENTRY_ERROR_MESSAGE));
            }
        }

        self.inner.write(entry, fields)
    }

    fn sync(&self) -> Result<(), CoreError> {
        self.inner.sync()
    }
}
