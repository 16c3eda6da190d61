//! SVG output.

use bohrprofil_core::draw::VectorDrawing;
use log::debug;

use crate::export::{self, Exporter};

/// Writes a drawing as a standalone SVG document.
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgExporter;

impl SvgExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for SvgExporter {
    fn export(&self, drawing: &VectorDrawing) -> Result<Vec<u8>, export::Error> {
        let mut bytes = Vec::new();
        svg::write(&mut bytes, &drawing.to_document())
            .map_err(|err| export::Error::Render(err.to_string()))?;
        debug!(bytes = bytes.len(); "SVG document written");
        Ok(bytes)
    }
}
