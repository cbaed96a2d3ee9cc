//! Collector for diagnostics reported while a conversion continues.
//!
//! Recoverable problems (a skipped model item, an unrecognized attribute
//! kind) are emitted here and logged immediately. When a fatal diagnostic
//! ends the conversion the collector turns into a [`ReadError`] that keeps
//! the warnings seen so far.

use log::{error, warn};

use crate::error::{Diagnostic, ReadError};

#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a diagnostic and keep it.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        let code = diagnostic.code().map(|c| c.as_str()).unwrap_or("-");
        let node = diagnostic.node().unwrap_or("-");
        if diagnostic.severity().is_error() {
            error!(code, node; "{}", diagnostic.message());
        } else {
            warn!(code, node; "{}", diagnostic.message());
        }
        self.diagnostics.push(diagnostic);
    }

    /// Number of diagnostics emitted so far.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Finish a successful conversion, returning the collected warnings.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Finish a failed conversion with its fatal diagnostic.
    pub fn fail(mut self, fatal: Diagnostic) -> ReadError {
        self.emit(fatal);
        ReadError::new(self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_collector_finish_empty() {
        let collector = DiagnosticCollector::new();
        assert!(collector.finish().is_empty());
    }

    #[test]
    fn test_collector_finish_keeps_warnings() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("warning 1").with_code(ErrorCode::W001));
        collector.emit(Diagnostic::warning("warning 2").with_code(ErrorCode::W002));

        assert_eq!(collector.len(), 2);
        let warnings = collector.finish();
        assert_eq!(warnings[0].message(), "warning 1");
        assert_eq!(warnings[1].code(), Some(ErrorCode::W002));
    }

    #[test]
    fn test_collector_fail_appends_fatal_last() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("skipped"));

        let err = collector.fail(Diagnostic::error("fatal").with_code(ErrorCode::E200));

        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.fatal().map(Diagnostic::code), Some(Some(ErrorCode::E200)));
        assert_eq!(err.warnings().count(), 1);
    }
}
