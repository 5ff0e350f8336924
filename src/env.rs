//! Environment variable names used by this crate for configuring the
//! forwarding core from microservices.
//!
//! These are purely helpers; [`SentryCore`](crate::sentry_core::SentryCore)
//! itself never reads the environment.

use crate::error::ConfigError;
use crate::level::Level;
use crate::options::{with_min_severity, with_request, with_secret_headers, CoreOption};

/// Minimum level forwarded to Sentry, e.g. `warn`.
pub const LOG_SINK_SENTRY_MIN_LEVEL_ENV: &str = "LOG_SINK_SENTRY_MIN_LEVEL";

/// Name of the log field carrying the HTTP request.
pub const LOG_SINK_SENTRY_REQUEST_FIELD_ENV: &str = "LOG_SINK_SENTRY_REQUEST_FIELD";

/// Request context key holding the raw request body.
pub const LOG_SINK_SENTRY_BODY_KEY_ENV: &str = "LOG_SINK_SENTRY_BODY_KEY";

/// Comma-separated header names to leave out of forwarded requests.
pub const LOG_SINK_SENTRY_SECRET_HEADERS_ENV: &str = "LOG_SINK_SENTRY_SECRET_HEADERS";

/// Build core options from the process environment.
pub fn options_from_env() -> Result<Vec<CoreOption>, ConfigError> {
    options_from_lookup(|key| std::env::var(key).ok())
}

/// Build core options from any key lookup. Unset or blank variables
/// contribute no option; a body key without a request field is ignored.
pub fn options_from_lookup<F>(lookup: F) -> Result<Vec<CoreOption>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let mut options = Vec::new();

    if let Some(level) = get(LOG_SINK_SENTRY_MIN_LEVEL_ENV) {
        options.push(with_min_severity(level.parse::<Level>()?));
    }

    if let Some(field) = get(LOG_SINK_SENTRY_REQUEST_FIELD_ENV) {
        let body_key = get(LOG_SINK_SENTRY_BODY_KEY_ENV);
        options.push(with_request(field.trim(), body_key.as_deref().map(str::trim)));
    }

    if let Some(headers) = get(LOG_SINK_SENTRY_SECRET_HEADERS_ENV) {
        options.push(with_secret_headers(
            headers.split(',').map(str::trim).filter(|h| !h.is_empty()),
        ));
    }

    Ok(options)
}
