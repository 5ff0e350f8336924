use sentry_log_sink::env::options_from_env;
use sentry_log_sink::init::{init_tracing_with_config, InitConfig};
use sentry_log_sink::level::Level;
use sentry_log_sink::options::with_min_severity;
use sentry_log_sink::sentry_core::new_wrapper;
use sentry_log_sink::writer_core::WriterCore;
use tracing::{error, info, warn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Point this DSN at your Sentry project, e.g. via `SENTRY_DSN`.
    let _guard = sentry::init(std::env::var("SENTRY_DSN").unwrap_or_default());
    let client = sentry::Hub::current().client().ok_or("sentry client not bound")?;

    // Defaults first, environment (LOG_SINK_SENTRY_*) overrides.
    let mut options = vec![with_min_severity(Level::WARN)];
    options.extend(options_from_env()?);

    let wrap = new_wrapper(client, options);
    // The wrapped core prints every entry, so no extra fmt layer.
    let core = wrap(Box::new(WriterCore::new(Level::INFO, std::io::stdout)));
    init_tracing_with_config(core, InitConfig { enable_stdout: false })?;

    info!(user = "ada", "session opened");
    warn!(latency_ms = 870u64, "slow upstream");
    error!(order_id = 123, "order failed");

    Ok(())
}
