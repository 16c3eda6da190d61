//! PDF output, converted from the SVG document with `svg2pdf`.

use bohrprofil_core::draw::VectorDrawing;
use log::{debug, info};

use crate::export::{self, Exporter};

/// Converts a drawing to a single-page PDF.
///
/// Text is laid out with the system fonts. `fallback_family` is used for any
/// family in the document that is not installed.
#[derive(Debug, Clone)]
pub struct PdfExporter {
    fallback_family: String,
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self::new("Arial")
    }
}

impl PdfExporter {
    pub fn new(fallback_family: impl Into<String>) -> Self {
        Self {
            fallback_family: fallback_family.into(),
        }
    }

    /// Converts an SVG document to PDF bytes.
    pub fn convert(&self, svg: &str) -> Result<Vec<u8>, export::Error> {
        let mut options = svg2pdf::usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        options.font_family = self.fallback_family.clone();

        let tree = svg2pdf::usvg::Tree::from_str(svg, &options)
            .map_err(|err| export::Error::Pdf(format!("failed to parse SVG: {err}")))?;
        debug!("SVG tree prepared for PDF conversion");

        let pdf = svg2pdf::to_pdf(
            &tree,
            svg2pdf::ConversionOptions::default(),
            svg2pdf::PageOptions::default(),
        )
        .map_err(|err| export::Error::Pdf(err.to_string()))?;
        info!(bytes = pdf.len(); "PDF converted");
        Ok(pdf)
    }
}

impl Exporter for PdfExporter {
    fn export(&self, drawing: &VectorDrawing) -> Result<Vec<u8>, export::Error> {
        self.convert(&drawing.to_svg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_svg_is_a_pdf_error() {
        let result = PdfExporter::default().convert("<not-svg");
        assert!(matches!(result, Err(export::Error::Pdf(_))));
    }

    #[test]
    fn test_simple_document_converts() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50" viewBox="0 0 100 50"><rect x="10" y="10" width="20" height="20" fill="black"/></svg>"#;
        let pdf = PdfExporter::default().convert(svg).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }
}
