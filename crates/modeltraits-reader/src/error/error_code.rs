//! Error codes for the reader diagnostic system.
//!
//! Codes are organized by phase:
//! - `E0xx` - Attribute source errors
//! - `E1xx` - Expression errors
//! - `E2xx` - Tree structure errors
//! - `E3xx` - Geometry errors
//! - `W0xx` - Warnings for skipped items

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Source Errors (E0xx)
    // =========================================================================
    /// The attribute source reported an error.
    ///
    /// The message carries the source's own error code and text.
    E001,

    // =========================================================================
    // Expression Errors (E1xx)
    // =========================================================================
    /// Unexpected variable in an expression.
    ///
    /// Only `$x`, `$y`, `$z` and `$t` are recognized.
    E100,

    /// String expressions are not supported.
    ///
    /// A string attribute was given as an expression instead of a literal.
    E101,

    // =========================================================================
    // Structure Errors (E2xx)
    // =========================================================================
    /// Multiple model associations on a single node.
    E200,

    /// Unsupported representation kind.
    ///
    /// The node is neither a boundary-condition attribute nor a grouping.
    E201,

    /// Inconsistent image class.
    ///
    /// Root cases converted together must share one image class.
    E202,

    /// Attribute value does not match its representation kind.
    E203,

    /// No root case.
    ///
    /// The attribute tree contains no case that can be converted.
    E204,

    // =========================================================================
    // Geometry Errors (E3xx)
    // =========================================================================
    /// Entity type codes of the source do not match the dimension mapping.
    E300,

    /// Model item has an entity type code with no dimension.
    E301,

    // =========================================================================
    // Warnings (W0xx)
    // =========================================================================
    /// A model item that is not a geometric entity was skipped.
    W001,

    /// An attribute with an unrecognized representation kind was skipped.
    W002,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::W001 => "W001",
            ErrorCode::W002 => "W002",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "attribute source error",
            ErrorCode::E100 => "unexpected variable",
            ErrorCode::E101 => "unsupported string expression",
            ErrorCode::E200 => "multiple model associations",
            ErrorCode::E201 => "unsupported representation kind",
            ErrorCode::E202 => "inconsistent image class",
            ErrorCode::E203 => "value does not match kind",
            ErrorCode::E204 => "no root case",
            ErrorCode::E300 => "dimension mapping mismatch",
            ErrorCode::E301 => "unknown entity type",
            ErrorCode::W001 => "non-geometric model item",
            ErrorCode::W002 => "unrecognized attribute kind",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
