use std::sync::Arc;

use sentry_log_sink::field::Field;
use sentry_log_sink::level::Level;
use sentry_log_sink::logger::Logger;
use sentry_log_sink::options::{with_min_severity, with_request, with_secret_headers};
use sentry_log_sink::request::RequestContext;
use sentry_log_sink::sentry_core::new_wrapper;
use sentry_log_sink::tracing_core::TracingCore;
use sentry_log_sink::tracker::{EventId, Tracker, TrackingEvent};

/// Stand-in for a real tracking client: prints each event as JSON.
struct StdoutTracker;

impl Tracker for StdoutTracker {
    fn submit(&self, event: TrackingEvent) -> Option<EventId> {
        match serde_json::to_string_pretty(&event) {
            Ok(json) => println!("[tracker] {}", json),
            Err(e) => eprintln!("[tracker] cannot encode event: {}", e),
        }
        Some(EventId::from_u128(1))
    }
}

fn main() {
    // Output of the wrapped `TracingCore`.
    tracing_subscriber::fmt().with_max_level(tracing::Level::TRACE).init();

    let wrap = new_wrapper(
        Arc::new(StdoutTracker),
        [
            with_min_severity(Level::WARN),
            with_request("http_request", Some("raw_body")),
            with_secret_headers(["Authorization", "Cookie"]),
        ],
    );

    let logger = Logger::new(wrap(Box::new(TracingCore::default())))
        .named("checkout")
        .with_stacktrace(Level::ERROR);

    let mut req = http::Request::post("https://shop.example.com/pay?order=17")
        .header("Authorization", "Bearer hunter2")
        .header("X-Request-Id", "r-42")
        .body(())
        .expect("valid request");
    req.extensions_mut()
        .insert(RequestContext::new().with_value("raw_body", b"{\"amount\":1250}".to_vec()));

    let request_logger = logger.with(vec![Field::str("request_id", "r-42")]);

    // Logged only.
    request_logger.info("payment started", vec![Field::u64("amount", 1250)]);

    // Logged and forwarded with the redacted request.
    request_logger.error(
        "payment declined",
        vec![Field::str("reason", "card expired"), Field::request("http_request", req)],
    );
}
