mod common;

use std::sync::Arc;

use common::{SharedBuffer, SpyTracker};
use sentry_log_sink::layer::CoreLayer;
use sentry_log_sink::level::Level;
use sentry_log_sink::options::with_min_severity;
use sentry_log_sink::sentry_core::{SentryCore, SENTRY_ERROR_KEY};
use sentry_log_sink::writer_core::WriterCore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

fn subscriber(
    core_out: &SharedBuffer,
    console_out: &SharedBuffer,
    tracker: &Arc<SpyTracker>,
) -> impl tracing::Subscriber + Send + Sync {
    let core = SentryCore::new(
        Box::new(WriterCore::new(Level::INFO, core_out.clone())),
        tracker.clone(),
        vec![with_min_severity(Level::ERROR)],
    );
    let console = tracing_subscriber::fmt::layer()
        .with_writer(console_out.clone())
        .with_ansi(false);

    Registry::default().with(CoreLayer::new(Box::new(core))).with(console)
}

#[test]
fn rejected_event_is_flagged_in_core_output() {
    let core_out = SharedBuffer::default();
    let console_out = SharedBuffer::default();
    let tracker = Arc::new(SpyTracker::rejecting());

    tracing::subscriber::with_default(subscriber(&core_out, &console_out, &tracker), || {
        tracing::error!(target: "billing", order_id = 123, "order failed");
    });

    assert_eq!(tracker.events().len(), 1);

    let written = core_out.contents();
    assert!(written.contains("ERROR billing"), "{written}");
    assert!(written.contains("order failed"), "{written}");
    assert!(written.contains("\"order_id\":123"), "{written}");
    assert!(written.contains(SENTRY_ERROR_KEY), "{written}");

    assert!(console_out.contents().contains("order failed"));
}

#[test]
fn accepted_and_unforwarded_events_carry_no_error_field() {
    let core_out = SharedBuffer::default();
    let console_out = SharedBuffer::default();
    let tracker = Arc::new(SpyTracker::default());

    tracing::subscriber::with_default(subscriber(&core_out, &console_out, &tracker), || {
        tracing::debug!("below every minimum");
        tracing::warn!(latency_ms = 870u64, "slow upstream");
        tracing::error!("order failed");
    });

    assert_eq!(tracker.events().len(), 1);

    let written = core_out.contents();
    assert_eq!(written.lines().count(), 2, "{written}");
    assert!(!written.contains("below every minimum"));
    assert!(written.contains("slow upstream"));
    assert!(!written.contains(SENTRY_ERROR_KEY), "{written}");
}
