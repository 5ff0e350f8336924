/// Error returned by a [`Core`](crate::core::Core).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// The configured request field held something other than an HTTP request.
    #[error("wrong type of request {0}")]
    WrongRequestType(String),

    #[error("log core write failed: {0}")]
    Write(String),

    #[error("log core sync failed: {0}")]
    Sync(String),
}

/// Error returned by [`CheckedEntry::write`](crate::entry::CheckedEntry::write).
///
/// Every core the entry was routed to is still written; the errors of the
/// ones that failed are collected here in routing order.
#[derive(thiserror::Error, Debug)]
#[error("{} of the log cores failed, first: {}", .errors.len(), .errors[0])]
pub struct WriteError {
    pub errors: Vec<CoreError>,
}

/// Error returned when building configuration from text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown log level: {0:?}")]
    InvalidLevel(String),
}
