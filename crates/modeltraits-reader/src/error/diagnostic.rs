//! The core diagnostic type for the reader error system.
//!
//! A [`Diagnostic`] represents a single error or warning with an optional
//! error code, the path of the attribute node it concerns, and help text.

use std::fmt;

use crate::error::{Severity, error_code::ErrorCode};

/// A diagnostic message about one attribute node.
///
/// Node paths are the `/`-separated info types from the root case down to
/// the offending node, e.g. `case1/Inlet/velocity`.
///
/// # Example
///
/// ```text
/// error[E100]: unexpected variable `$q` in expression `2 * $q`
///   at case1/Inlet/velocity
///   = help: expressions may only reference $x, $y, $z and $t
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    node: Option<String>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use modeltraits_reader::error::{Diagnostic, ErrorCode};
    ///
    /// let diag = Diagnostic::error("unsupported representation kind `reference`")
    ///     .with_code(ErrorCode::E201)
    ///     .with_node("case1/Solver");
    /// assert!(diag.severity().is_error());
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the path of the node this diagnostic is about, if any.
    pub fn node(&self) -> Option<&str> {
        self.node.as_deref()
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the node path.
    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    /// Set the node path unless one is already present.
    ///
    /// Inner helpers that know nothing about the tree produce diagnostics
    /// without a path; the walker fills it in on the way out.
    pub fn or_node(mut self, node: impl FnOnce() -> String) -> Self {
        if self.node.is_none() {
            self.node = Some(node());
        }
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            node: None,
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E001]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
