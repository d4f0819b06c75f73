//! Injectable logging capability.
//!
//! Components receive an `Arc<dyn Diagnostics>` instead of calling the global
//! logger directly, so tests can capture what was emitted.

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

pub trait Diagnostics: Send + Sync {
    fn emit(&self, severity: Severity, message: &str);

    fn info(&self, message: &str) {
        self.emit(Severity::Info, message);
    }

    fn warn(&self, message: &str) {
        self.emit(Severity::Warn, message);
    }

    fn error(&self, message: &str) {
        self.emit(Severity::Error, message);
    }
}

/// Forwards to the `log` facade under a fixed target.
#[derive(Debug, Clone)]
pub struct LogDiagnostics {
    target: &'static str,
}

impl LogDiagnostics {
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }

    pub fn shared(target: &'static str) -> Arc<dyn Diagnostics> {
        Arc::new(Self::new(target))
    }
}

impl Default for LogDiagnostics {
    fn default() -> Self {
        Self::new("celo_plugin")
    }
}

impl Diagnostics for LogDiagnostics {
    fn emit(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => log::info!(target: self.target, "{message}"),
            Severity::Warn => log::warn!(target: self.target, "{message}"),
            Severity::Error => log::error!(target: self.target, "{message}"),
        }
    }
}

/// Keeps every emitted record in memory.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    records: Mutex<Vec<(Severity, String)>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(Severity, String)> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn messages_at(&self, severity: Severity) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m)
            .collect()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn emit(&self, severity: Severity, message: &str) {
        if let Ok(mut lock) = self.records.lock() {
            lock.push((severity, message.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_diagnostics_keeps_order_and_severity() {
        // given
        let diagnostics = RecordingDiagnostics::new();

        // when
        diagnostics.info("quote requested");
        diagnostics.warn("decimals defaulted");
        diagnostics.error("send failed");

        // then
        assert_eq!(
            diagnostics.records(),
            vec![
                (Severity::Info, "quote requested".to_string()),
                (Severity::Warn, "decimals defaulted".to_string()),
                (Severity::Error, "send failed".to_string()),
            ]
        );
        assert_eq!(diagnostics.messages_at(Severity::Warn), vec!["decimals defaulted"]);
    }
}
