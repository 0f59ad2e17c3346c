//! Pluggable logging hook for the request pipeline.
//!
//! The client never logs through process-wide state of its own. It is handed
//! a [`Logger`] at construction; the default is [`NoopLogger`]. Use
//! [`TracingLogger`] to forward pipeline events to `tracing`.

use std::fmt;

/// Severity of a pipeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// Receiver for pipeline events.
///
/// Only [`Logger::log`] is required; the level helpers forward to it.
pub trait Logger: Send + Sync + fmt::Debug {
    /// Record one event.
    fn log(&self, level: Level, message: &str);

    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _level: Level, _message: &str) {}
}

/// Forwards events to the `tracing` subscriber under the `huntress` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::Debug => tracing::debug!(target: "huntress", "{message}"),
            Level::Info => tracing::info!(target: "huntress", "{message}"),
            Level::Warn => tracing::warn!(target: "huntress", "{message}"),
            Level::Error => tracing::error!(target: "huntress", "{message}"),
        }
    }
}
