//! Sentry implementation of [`Tracker`].

use std::time::SystemTime;

use sentry::protocol::{Event, Request};
use url::Url;

use crate::level::TrackingSeverity;
use crate::tracker::{EventId, RequestSummary, Tracker, TrackingEvent};

impl Tracker for sentry::Client {
    /// Capture the event with the current hub's scope applied, so tags, user,
    /// breadcrumbs and contexts set by the application travel with it. The
    /// client's transport handles delivery; a nil event id means the client
    /// dropped the event.
    fn submit(&self, event: TrackingEvent) -> Option<EventId> {
        let scope = sentry::Hub::current().configure_scope(|scope| scope.clone());
        let id = self.capture_event(to_sentry_event(event), Some(&scope));
        if id.is_nil() {
            None
        } else {
            Some(id)
        }
    }
}

/// Convert a [`TrackingEvent`] into Sentry's protocol type.
pub fn to_sentry_event(event: TrackingEvent) -> Event<'static> {
    Event {
        message: Some(event.message),
        timestamp: SystemTime::from(event.timestamp),
        level: sentry_level(event.level),
        extra: event.extra.into_iter().collect(),
        request: event.request.map(to_sentry_request),
        ..Default::default()
    }
}

fn to_sentry_request(summary: RequestSummary) -> Request {
    Request {
        // Relative request targets have no absolute URL to report.
        url: Url::parse(&summary.url).ok(),
        method: Some(summary.method),
        query_string: Some(summary.query_string).filter(|q| !q.is_empty()),
        headers: summary.headers.into_iter().collect(),
        data: summary.data,
        ..Default::default()
    }
}

pub fn sentry_level(severity: TrackingSeverity) -> sentry::Level {
    match severity {
        TrackingSeverity::Debug => sentry::Level::Debug,
        TrackingSeverity::Info => sentry::Level::Info,
        TrackingSeverity::Warning => sentry::Level::Warning,
        TrackingSeverity::Error => sentry::Level::Error,
        TrackingSeverity::Fatal => sentry::Level::Fatal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    fn tracking_event(request: Option<RequestSummary>) -> TrackingEvent {
        TrackingEvent {
            message: "payment declined".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            level: TrackingSeverity::Warning,
            extra: BTreeMap::from([("stacktrace".to_string(), serde_json::json!(""))]),
            request,
        }
    }

    #[test]
    fn converts_event_fields() {
        let event = to_sentry_event(tracking_event(None));

        assert_eq!(event.message.as_deref(), Some("payment declined"));
        assert_eq!(event.level, sentry::Level::Warning);
        assert_eq!(
            event.timestamp,
            SystemTime::from(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
        );
        assert!(event.extra.contains_key("stacktrace"));
        assert!(event.request.is_none());
    }

    #[test]
    fn converts_request_summary() {
        let summary = RequestSummary {
            url: "https://shop.example.com/pay?x=1".to_string(),
            method: "POST".to_string(),
            query_string: "x=1".to_string(),
            headers: BTreeMap::from([("X-Id".to_string(), "42".to_string())]),
            data: Some("{}".to_string()),
        };

        let request = to_sentry_event(tracking_event(Some(summary))).request.unwrap();

        assert_eq!(request.url.unwrap().as_str(), "https://shop.example.com/pay?x=1");
        assert_eq!(request.method.as_deref(), Some("POST"));
        assert_eq!(request.query_string.as_deref(), Some("x=1"));
        assert_eq!(request.headers["X-Id"], "42");
        assert_eq!(request.data.as_deref(), Some("{}"));
    }

    #[test]
    fn submit_applies_current_scope() {
        let events = sentry::test::with_captured_events(|| {
            sentry::configure_scope(|scope| scope.set_tag("tenant", "acme"));
            let client = sentry::Hub::current().client().expect("test client bound");

            assert!(client.submit(tracking_event(None)).is_some());
        });

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message.as_deref(), Some("payment declined"));
        assert_eq!(events[0].tags.get("tenant").map(String::as_str), Some("acme"));
    }

    #[test]
    fn relative_urls_are_dropped() {
        let summary = RequestSummary {
            url: "/pay".to_string(),
            method: "GET".to_string(),
            ..Default::default()
        };

        let request = to_sentry_event(tracking_event(Some(summary))).request.unwrap();

        assert!(request.url.is_none());
        assert!(request.query_string.is_none());
    }
}
