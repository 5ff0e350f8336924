use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::level::TrackingSeverity;

/// Identifier the tracking service assigns to an accepted event.
pub type EventId = uuid::Uuid;

/// Payload submitted to the error-tracking service for one log entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingEvent {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub level: TrackingSeverity,
    /// Encoded entry fields plus a `stacktrace` key.
    pub extra: BTreeMap<String, serde_json::Value>,
    pub request: Option<RequestSummary>,
}

/// Redacted description of the HTTP request an entry was logged for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestSummary {
    pub url: String,
    pub method: String,
    pub query_string: String,
    pub headers: BTreeMap<String, String>,
    /// Raw request body decoded as text, when one was found.
    pub data: Option<String>,
}

/// Client of the error-tracking service.
///
/// Implementations own delivery: queueing, transport and retries all happen
/// behind `submit`. The call is synchronous from the caller's point of view
/// and is made concurrently from every thread that logs, so implementations
/// must be safe to share.
pub trait Tracker: Send + Sync {
    /// Submit an event.
    ///
    /// **Returns**
    /// - `Some(id)` if the client accepted the event.
    /// - `None` if it was dropped (disabled client, full queue, rate limit,
    ///   etc.).
    fn submit(&self, event: TrackingEvent) -> Option<EventId>;
}
