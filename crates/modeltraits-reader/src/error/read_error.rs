//! The ReadError type returned by a failed conversion.

use std::fmt;

use crate::error::Diagnostic;

/// A type alias for `Result<T, Diagnostic>`.
pub type Result<T> = std::result::Result<T, Diagnostic>;

/// Error type for a conversion.
///
/// Holds the fatal diagnostic that aborted the conversion and any warnings
/// reported before it. The fatal diagnostic is always the last one.
#[derive(Debug)]
pub struct ReadError {
    diagnostics: Vec<Diagnostic>,
}

impl ReadError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error, in the order they were reported.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The diagnostic that aborted the conversion.
    pub fn fatal(&self) -> Option<&Diagnostic> {
        self.diagnostics
            .iter()
            .rev()
            .find(|diag| diag.severity().is_error())
    }

    /// Warnings reported before the conversion was aborted.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity().is_warning())
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(fatal) = self.fatal() {
            write!(f, "{}", fatal)?;
            if let Some(node) = fatal.node() {
                write!(f, " (at {node})")?;
            }
            let warnings = self.warnings().count();
            if warnings > 0 {
                write!(f, " (+{warnings} warnings)")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ReadError {}

impl From<Diagnostic> for ReadError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_read_error_from_diagnostic() {
        let diag = Diagnostic::error("test error").with_code(ErrorCode::E201);
        let err: ReadError = diag.into();

        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.fatal().unwrap().message(), "test error");
        assert_eq!(err.warnings().count(), 0);
    }

    #[test]
    fn test_read_error_display() {
        let err: ReadError = Diagnostic::error("unsupported kind")
            .with_code(ErrorCode::E201)
            .into();
        assert_eq!(err.to_string(), "error[E201]: unsupported kind");
    }

    #[test]
    fn test_read_error_display_with_node_and_warnings() {
        let err = ReadError::new(vec![
            Diagnostic::warning("skipped item"),
            Diagnostic::warning("skipped attribute"),
            Diagnostic::error("two associations")
                .with_code(ErrorCode::E200)
                .with_node("c/Inlet"),
        ]);

        assert_eq!(
            err.to_string(),
            "error[E200]: two associations (at c/Inlet) (+2 warnings)"
        );
    }
}
