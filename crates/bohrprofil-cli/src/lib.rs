//! CLI logic for the borehole profile renderer.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};

use bohrprofil::{ProfileBuilder, ProfileError};

/// Run the Bohrprofil CLI application
///
/// Reads the profile document, renders it and writes the SVG. When a PDF path
/// is given the PDF is written afterwards, so a failed conversion never costs
/// the SVG.
///
/// # Errors
///
/// Returns `ProfileError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Document errors
/// - Layout errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), ProfileError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing profile"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;

    let builder = ProfileBuilder::new(app_config);
    let profile = builder.parse(&source)?;
    let svg = builder.render_svg(&profile)?;

    fs::write(&args.output, svg)?;
    info!(output_file = args.output; "SVG exported successfully");

    if let Some(pdf_path) = &args.pdf {
        let pdf = render_pdf(&builder, &profile).inspect_err(|err| {
            warn!(err:%; "PDF export failed, SVG was written");
        })?;
        fs::write(pdf_path, pdf)?;
        info!(output_file = pdf_path; "PDF exported successfully");
    }

    Ok(())
}

#[cfg(feature = "pdf")]
fn render_pdf(
    builder: &ProfileBuilder,
    profile: &bohrprofil::model::ProfileInput,
) -> Result<Vec<u8>, ProfileError> {
    builder.render_pdf(profile)
}

#[cfg(not(feature = "pdf"))]
fn render_pdf(
    _builder: &ProfileBuilder,
    _profile: &bohrprofil::model::ProfileInput,
) -> Result<Vec<u8>, ProfileError> {
    Err(ProfileError::Export(
        "PDF output requires the `pdf` feature".into(),
    ))
}
