//! Error types for profile processing.
//!
//! [`ProfileError`] is the single error type returned by the
//! [`ProfileBuilder`](crate::ProfileBuilder) facade. Most data problems do not
//! reach it: bad rows, unknown categories and empty columns are handled where
//! they occur and only logged.

use std::io;

use thiserror::Error;

use crate::input::InputError;

/// The main error type for profile operations.
///
/// # Diagnostic Variants
///
/// The `Input` variant keeps the source document next to the error so a
/// reporter can show the offending snippet.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Input { err: InputError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for ProfileError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl ProfileError {
    /// Create a new `Input` error with the associated source document.
    pub fn new_input_error(err: InputError, src: impl Into<String>) -> Self {
        Self::Input {
            err,
            src: src.into(),
        }
    }
}
