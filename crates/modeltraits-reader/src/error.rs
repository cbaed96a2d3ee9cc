//! Error and diagnostic system for the model-traits reader.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - The attribute node path where the problem was found
//! - Severity levels
//! - A collector for warnings reported while conversion continues
//!
//! # Overview
//!
//! Every problem is reported as a [`Diagnostic`]. Fatal diagnostics stop the
//! conversion and are returned inside a [`ReadError`] together with the
//! warnings gathered up to that point. Errors raised by the attribute source
//! itself ([`SourceError`](crate::source::SourceError)) are converted to
//! diagnostics with code [`ErrorCode::E001`] at this boundary.
//!
//! # Example
//!
//! ```
//! # use modeltraits_reader::error::{Diagnostic, ErrorCode};
//!
//! let diag = Diagnostic::error("node has 2 model associations")
//!     .with_code(ErrorCode::E200)
//!     .with_node("case1/Inlet")
//!     .with_help("attach at most one model association per attribute");
//!
//! assert_eq!(diag.to_string(), "error[E200]: node has 2 model associations");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod read_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use read_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use read_error::ReadError;
pub use severity::Severity;
