//! Export of finished drawings into output formats.
//!
//! # Available Backends
//!
//! - [`svg`]: UTF-8 SVG bytes
//! - [`pdf`]: PDF converted from the SVG document (feature `pdf`)
//!
//! [`Error`] converts into [`ProfileError::Export`] at the crate boundary.
//!
//! [`ProfileError::Export`]: crate::ProfileError::Export

/// PDF export backend.
#[cfg(feature = "pdf")]
pub mod pdf;
/// SVG export backend.
pub mod svg;

use bohrprofil_core::draw::VectorDrawing;

/// Abstraction for drawing export backends.
pub trait Exporter {
    /// Serializes `drawing` into the backend's format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the drawing cannot be serialized, or
    /// [`Error::Pdf`] if a PDF conversion fails.
    fn export(&self, drawing: &VectorDrawing) -> Result<Vec<u8>, Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// Serializing the SVG document failed.
    Render(String),
    /// Converting the SVG document to PDF failed.
    Pdf(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Pdf(msg) => write!(f, "PDF conversion error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::Render("broken".to_string()).to_string(),
            "Render error: broken"
        );
        assert_eq!(
            Error::Pdf("no fonts".to_string()).to_string(),
            "PDF conversion error: no fonts"
        );
    }
}
