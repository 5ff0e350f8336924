use std::collections::HashSet;

use crate::level::Level;

/// Settings of a [`SentryCore`](crate::sentry_core::SentryCore), fixed at
/// construction and shared by every core derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreConfig {
    /// Entries below this level are never forwarded. `None` forwards all.
    pub min_severity: Option<Level>,
    /// Name of the field that carries an HTTP request.
    pub request_field: Option<String>,
    /// Key of the raw request body in the request's
    /// [`RequestContext`](crate::request::RequestContext).
    pub body_context_key: Option<String>,
    /// Lower-cased names of headers left out of forwarded requests.
    pub secret_headers: HashSet<String>,
}

impl CoreConfig {
    pub fn from_options(options: impl IntoIterator<Item = CoreOption>) -> Self {
        let mut config = CoreConfig::default();
        for option in options {
            option.apply(&mut config);
        }
        config
    }

    /// Whether an entry at `level` is forwarded to the tracker.
    pub fn forwards(&self, level: Level) -> bool {
        self.min_severity.map_or(true, |min| level >= min)
    }
}

/// One configuration setting. Options are applied in order, so a later
/// option overrides an earlier one for the same setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreOption {
    MinSeverity(Level),
    Request {
        field_name: String,
        body_context_key: Option<String>,
    },
    SecretHeaders(Vec<String>),
}

impl CoreOption {
    pub fn apply(self, config: &mut CoreConfig) {
        match self {
            CoreOption::MinSeverity(level) => config.min_severity = Some(level),
            CoreOption::Request {
                field_name,
                body_context_key,
            } => {
                config.request_field = Some(field_name);
                // A missing body key keeps the one configured earlier.
                if body_context_key.is_some() {
                    config.body_context_key = body_context_key;
                }
            }
            CoreOption::SecretHeaders(names) => {
                config.secret_headers = names.iter().map(|n| n.to_lowercase()).collect();
            }
        }
    }
}

/// Forward only entries at or above `level`.
pub fn with_min_severity(level: Level) -> CoreOption {
    CoreOption::MinSeverity(level)
}

/// Extract an HTTP request from the field named `field_name`, optionally
/// reading the raw body from the request context under `body_context_key`.
pub fn with_request(field_name: impl Into<String>, body_context_key: Option<&str>) -> CoreOption {
    CoreOption::Request {
        field_name: field_name.into(),
        body_context_key: body_context_key.map(str::to_string),
    }
}

/// Leave these headers (case-insensitive) out of forwarded requests.
/// Replaces any previously registered set.
pub fn with_secret_headers<I, S>(names: I) -> CoreOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CoreOption::SecretHeaders(names.into_iter().map(Into::into).collect())
}
