#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use sentry_log_sink::core::Core;
use sentry_log_sink::entry::{CheckedEntry, Entry};
use sentry_log_sink::error::CoreError;
use sentry_log_sink::field::Field;
use sentry_log_sink::level::Level;
use sentry_log_sink::tracker::{EventId, Tracker, TrackingEvent};
use tracing_subscriber::fmt::MakeWriter;

/// Core that records every write, shared by all cores derived from it.
#[derive(Clone, Default)]
pub struct SpyCore {
    pub writes: Arc<Mutex<Vec<(Entry, Vec<Field>)>>>,
    pub withs: Arc<Mutex<Vec<Vec<Field>>>>,
    pub fail_with: Option<CoreError>,
}

impl SpyCore {
    pub fn failing(err: CoreError) -> Self {
        SpyCore {
            fail_with: Some(err),
            ..Default::default()
        }
    }

    pub fn writes(&self) -> Vec<(Entry, Vec<Field>)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn last_fields(&self) -> Vec<Field> {
        self.writes().last().map(|(_, f)| f.clone()).unwrap_or_default()
    }
}

impl Core for SpyCore {
    fn enabled(&self, _level: Level) -> bool {
        true
    }

    fn with(&self, fields: Vec<Field>) -> Box<dyn Core> {
        self.withs.lock().unwrap().push(fields);
        Box::new(self.clone())
    }

    fn check<'a>(&'a self, entry: &Entry, ce: CheckedEntry<'a>) -> CheckedEntry<'a> {
        if self.enabled(entry.level) {
            ce.add_core(self)
        } else {
            ce
        }
    }

    fn write(&self, entry: &Entry, fields: Vec<Field>) -> Result<(), CoreError> {
        self.writes.lock().unwrap().push((entry.clone(), fields));
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// Tracker that keeps submitted events and optionally reports failure.
#[derive(Default)]
pub struct SpyTracker {
    pub events: Mutex<Vec<TrackingEvent>>,
    pub reject: bool,
}

impl SpyTracker {
    pub fn rejecting() -> Self {
        SpyTracker {
            reject: true,
            ..Default::default()
        }
    }

    pub fn events(&self) -> Vec<TrackingEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Tracker for SpyTracker {
    fn submit(&self, event: TrackingEvent) -> Option<EventId> {
        self.events.lock().unwrap().push(event);
        if self.reject {
            None
        } else {
            Some(EventId::from_u128(0xfeed))
        }
    }
}

pub fn request(uri: &str) -> http::Request<()> {
    http::Request::get(uri).body(()).unwrap()
}

/// In-memory writer whose clones share one buffer.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = SharedBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
