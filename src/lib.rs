pub mod error;
pub mod level;
pub mod field;
pub mod entry;
pub mod core;
pub mod tracker;
pub mod options;
pub mod request;
pub mod sentry_core;

pub mod tracing_core;
pub mod writer_core;
pub mod layer;
pub mod logger;
pub mod noop_core;

#[cfg(feature = "sentry")]
pub mod sentry_client;

pub mod init;
pub mod env;
