//! Bohrprofil - borehole profile drawings.
//!
//! Renders the layer sequence of a borehole (geology) together with the well
//! construction (casing and annulus fill), water levels and a title block into
//! a print-ready SVG drawing, with optional PDF conversion.
//!
//! The pipeline is: profile document (TOML) → [`model::ProfileInput`] →
//! classification and layout → [`draw::VectorDrawing`] → SVG or PDF bytes.

pub mod classify;
pub mod config;
pub mod export;
pub mod input;
pub mod layout;
pub mod model;
pub mod render;
pub mod style;

mod error;

pub use bohrprofil_core::{color, draw, geometry};

pub use error::ProfileError;

use log::{debug, info, trace};

use classify::Classifier;
use config::AppConfig;
use draw::VectorDrawing;
use export::Exporter;
use model::ProfileInput;

/// Builder for parsing and rendering borehole profiles.
///
/// The classification tables are built once in [`ProfileBuilder::new`] and
/// reused for every render.
///
/// # Examples
///
/// ```rust
/// use bohrprofil::{ProfileBuilder, config::AppConfig};
///
/// let source = r#"
/// [[geology]]
/// from = 0.0
/// to = 2.5
/// category = "Sand"
/// label = "Feinsand"
/// "#;
///
/// let builder = ProfileBuilder::new(AppConfig::default());
/// let profile = builder.parse(source).expect("Failed to parse");
/// let svg = builder.render_svg(&profile).expect("Failed to render");
/// assert!(svg.contains("Feinsand"));
/// ```
#[derive(Debug, Default)]
pub struct ProfileBuilder {
    config: AppConfig,
    classifier: Classifier,
}

impl ProfileBuilder {
    /// Create a new profile builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let classifier = Classifier::new(config.classification());
        Self { config, classifier }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a profile document.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Input`] with the source attached when the
    /// document is not valid TOML or has the wrong shape.
    pub fn parse(&self, source: &str) -> Result<ProfileInput, ProfileError> {
        info!("Parsing profile document");
        let input =
            input::parse(source).map_err(|err| ProfileError::new_input_error(err, source))?;
        trace!(input:?; "Parsed profile");
        Ok(input)
    }

    /// Render a profile into a vector drawing.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Layout`] or [`ProfileError::Config`] for an
    /// unusable configuration. Data problems never fail the render.
    pub fn render(&self, input: &ProfileInput) -> Result<VectorDrawing, ProfileError> {
        let drawing = render::render_profile(input, &self.config, &self.classifier)?;
        debug!(
            width = drawing.width(),
            height = drawing.height();
            "Profile rendered",
        );
        Ok(drawing)
    }

    /// Render a profile to an SVG string.
    ///
    /// Identical input yields byte-identical output.
    ///
    /// # Errors
    ///
    /// See [`ProfileBuilder::render`].
    pub fn render_svg(&self, input: &ProfileInput) -> Result<String, ProfileError> {
        let drawing = self.render(input)?;
        let bytes = export::svg::SvgExporter::new().export(&drawing)?;
        let svg = String::from_utf8(bytes)
            .map_err(|err| ProfileError::Export(Box::new(err)))?;
        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// Render a profile to PDF bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Export`] when the PDF conversion fails, in
    /// addition to the errors of [`ProfileBuilder::render`].
    #[cfg(feature = "pdf")]
    pub fn render_pdf(&self, input: &ProfileInput) -> Result<Vec<u8>, ProfileError> {
        let drawing = self.render(input)?;
        let fallback = primary_font_family(self.config.style().font_family());
        let pdf = export::pdf::PdfExporter::new(fallback).export(&drawing)?;
        Ok(pdf)
    }
}

/// First family of a CSS font-family list, without quotes.
#[cfg(feature = "pdf")]
fn primary_font_family(families: &str) -> &str {
    families
        .split(',')
        .map(|family| family.trim().trim_matches(|c| c == '"' || c == '\''))
        .find(|family| !family.is_empty())
        .unwrap_or("Arial")
}

#[cfg(all(test, feature = "pdf"))]
mod tests {
    use super::*;

    #[test]
    fn test_primary_font_family() {
        assert_eq!(primary_font_family("Arial, sans-serif"), "Arial");
        assert_eq!(primary_font_family("'DejaVu Sans', sans-serif"), "DejaVu Sans");
        assert_eq!(primary_font_family(""), "Arial");
    }
}
