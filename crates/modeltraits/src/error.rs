//! Error types for model-traits operations.
//!
//! This module provides the main error type [`ModelTraitsError`] which wraps
//! the error conditions that can occur while loading an attribute document
//! and converting it.

use std::io;

use thiserror::Error;

use modeltraits_reader::ReadError;

/// The main error type for model-traits operations.
///
/// # Diagnostic Variants
///
/// The `Read` variant carries the conversion's diagnostics: the fatal one
/// with its attribute node path, and the warnings reported before it.
#[derive(Debug, Error)]
pub enum ModelTraitsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid attribute document: {0}")]
    Document(#[from] toml::de::Error),

    #[error("{err}")]
    Read { err: ReadError },
}

impl From<ReadError> for ModelTraitsError {
    fn from(err: ReadError) -> Self {
        Self::Read { err }
    }
}
