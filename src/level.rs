use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Severity of a log entry.
///
/// Numbered the way structured loggers usually number them, with `DEBUG`
/// below zero and `FATAL` at the top. Values outside the named set are
/// representable so that custom levels can flow through a core; they are
/// treated as the most severe when mapped to a [`TrackingSeverity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Level(i8);

impl Level {
    pub const DEBUG: Level = Level(-1);
    pub const INFO: Level = Level(0);
    pub const WARN: Level = Level(1);
    pub const ERROR: Level = Level(2);
    /// Panics in development builds of the calling application.
    pub const DPANIC: Level = Level(3);
    pub const PANIC: Level = Level(4);
    pub const FATAL: Level = Level(5);

    pub const fn from_i8(value: i8) -> Self {
        Level(value)
    }

    pub const fn as_i8(self) -> i8 {
        self.0
    }

    /// Lower-case name of a known level, `None` for custom values.
    pub fn name(self) -> Option<&'static str> {
        match self {
            Level::DEBUG => Some("debug"),
            Level::INFO => Some("info"),
            Level::WARN => Some("warn"),
            Level::ERROR => Some("error"),
            Level::DPANIC => Some("dpanic"),
            Level::PANIC => Some("panic"),
            Level::FATAL => Some("fatal"),
            _ => None,
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::INFO
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Level({})", self.0),
        }
    }
}

impl FromStr for Level {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" | "warning" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            "dpanic" => Ok(Level::DPANIC),
            "panic" => Ok(Level::PANIC),
            "fatal" => Ok(Level::FATAL),
            _ => Err(ConfigError::InvalidLevel(s.to_string())),
        }
    }
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Level::DEBUG,
            tracing::Level::INFO => Level::INFO,
            tracing::Level::WARN => Level::WARN,
            tracing::Level::ERROR => Level::ERROR,
        }
    }
}

/// Severity scale of the error-tracking service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingSeverity {
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl TrackingSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            TrackingSeverity::Debug => "debug",
            TrackingSeverity::Info => "info",
            TrackingSeverity::Warning => "warning",
            TrackingSeverity::Error => "error",
            TrackingSeverity::Fatal => "fatal",
        }
    }
}

impl fmt::Display for TrackingSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a log level onto the tracker's severity scale.
///
/// Every panic-class level becomes `Fatal`, and so does any level this
/// crate does not know about.
pub fn tracking_severity(level: Level) -> TrackingSeverity {
    match level {
        Level::DEBUG => TrackingSeverity::Debug,
        Level::INFO => TrackingSeverity::Info,
        Level::WARN => TrackingSeverity::Warning,
        Level::ERROR => TrackingSeverity::Error,
        Level::DPANIC | Level::PANIC | Level::FATAL => TrackingSeverity::Fatal,
        _ => TrackingSeverity::Fatal,
    }
}
