//! Logging seam for client operations.
//!
//! The client and the URL encoder report through a [`ClientLogger`] trait
//! object instead of a fixed backend. The default is [`NullLogger`], which
//! discards everything; [`TracingLogger`] forwards to the `tracing` macros
//! for applications that already run a subscriber.

use std::sync::{Arc, Mutex};

/// Receives log events from client operations.
///
/// Implementations must be thread safe; the client shares one logger across
/// clones and resource handles.
pub trait ClientLogger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Discards all log events. The default logger.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl ClientLogger for NullLogger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// Forwards log events to the `tracing` macros under the `rill_client` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl ClientLogger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "rill_client", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "rill_client", "{message}");
    }

    fn warning(&self, message: &str) {
        tracing::warn!(target: "rill_client", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "rill_client", "{message}");
    }
}

/// Records log events in memory. Intended for tests asserting on emitted
/// warnings.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<(Level, String)>>,
}

/// Severity of a recorded event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
}

impl RecordingLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// All recorded events, oldest first.
    pub fn events(&self) -> Vec<(Level, String)> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Messages recorded at warning level.
    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|(level, _)| *level == Level::Warning)
            .map(|(_, message)| message)
            .collect()
    }

    fn record(&self, level: Level, message: &str) {
        if let Ok(mut events) = self.events.lock() {
            events.push((level, message.to_string()));
        }
    }
}

impl ClientLogger for RecordingLogger {
    fn debug(&self, message: &str) {
        self.record(Level::Debug, message);
    }

    fn info(&self, message: &str) {
        self.record(Level::Info, message);
    }

    fn warning(&self, message: &str) {
        self.record(Level::Warning, message);
    }

    fn error(&self, message: &str) {
        self.record(Level::Error, message);
    }
}
