//! # Diagnostics
//!
//! Observational sink for notes, warnings and errors raised while pushing
//! or reading. Every record is also forwarded to the `log` facade, so a
//! host that installs a logger sees the same stream. Recording never
//! changes control flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::BridgeError;

/// Severity of a diagnostic record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Note,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}", label)
    }
}

/// A single diagnostic record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,

    /// Error code when the record came from a [`BridgeError`]
    pub code: Option<String>,

    /// Entity name the record concerns, when there is one
    pub entity: Option<String>,

    /// Adapter operation that produced the record (e.g. "create bar")
    pub operation: String,

    pub message: String,

    pub at: DateTime<Utc>,
}

/// Collecting diagnostics sink.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an informational note
    pub fn note(&mut self, operation: &str, entity: Option<&str>, message: impl Into<String>) {
        self.push(Severity::Note, None, operation, entity, message.into());
    }

    /// Record a warning
    pub fn warning(&mut self, operation: &str, entity: Option<&str>, message: impl Into<String>) {
        self.push(Severity::Warning, None, operation, entity, message.into());
    }

    /// Record an error
    pub fn error(&mut self, operation: &str, entity: Option<&str>, message: impl Into<String>) {
        self.push(Severity::Error, None, operation, entity, message.into());
    }

    /// Record a [`BridgeError`] at its own severity
    pub fn record(&mut self, operation: &str, error: &BridgeError) {
        self.push(
            error.severity(),
            Some(error.error_code().to_string()),
            operation,
            error.entity(),
            error.to_string(),
        );
    }

    fn push(
        &mut self,
        severity: Severity,
        code: Option<String>,
        operation: &str,
        entity: Option<&str>,
        message: String,
    ) {
        match severity {
            Severity::Note => log::info!("[{}] {}", operation, message),
            Severity::Warning => log::warn!("[{}] {}", operation, message),
            Severity::Error => log::error!("[{}] {}", operation, message),
        }
        self.records.push(Diagnostic {
            severity,
            code,
            entity: entity.map(str::to_string),
            operation: operation.to_string(),
            message,
            at: Utc::now(),
        });
    }

    /// All records in the order they were raised
    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    /// Records of one severity
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter().filter(move |d| d.severity == severity)
    }

    /// Number of records of one severity
    pub fn count(&self, severity: Severity) -> usize {
        self.with_severity(severity).count()
    }

    /// Records carrying a given error code
    pub fn with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.records
            .iter()
            .filter(move |d| d.code.as_deref() == Some(code))
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Remove and return all records
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_uses_error_severity_and_code() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.record("set bar", &BridgeError::property_warning("Release", "Bar", "4"));
        diagnostics.record("create bar", &BridgeError::validation("Bar", "B", "nodes are null"));

        assert_eq!(diagnostics.count(Severity::Warning), 1);
        assert_eq!(diagnostics.count(Severity::Error), 1);
        assert_eq!(diagnostics.with_code("VALIDATION").count(), 1);
        assert_eq!(diagnostics.records()[0].entity.as_deref(), Some("4"));
    }

    #[test]
    fn test_drain_empties_sink() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.note("create node", Some("1"), "assigned");
        assert_eq!(diagnostics.drain().len(), 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Note < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
