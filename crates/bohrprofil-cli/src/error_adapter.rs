//! Error adapter for converting ProfileError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use bohrprofil::{ProfileError, input::InputError};

/// Adapter for a profile document error with its source.
pub struct InputAdapter<'a> {
    err: &'a InputError,
    src: &'a str,
}

impl<'a> InputAdapter<'a> {
    pub fn new(err: &'a InputError, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for InputAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for InputAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.err.message())
    }
}

impl std::error::Error for InputAdapter<'_> {}

impl MietteDiagnostic for InputAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("bohrprofil::input"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "profile documents are TOML with [metadata], [[geology]], [[casing]], [[annulus]] and [[markers]]",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.err.span()?;
        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            span,
        ))))
    }
}

/// Adapter for [`ProfileError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a ProfileError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ProfileError::Io(_) => "bohrprofil::io",
            ProfileError::Input { .. } => "bohrprofil::input",
            ProfileError::Config(_) => "bohrprofil::config",
            ProfileError::Layout(_) => "bohrprofil::layout",
            ProfileError::Export(_) => "bohrprofil::export",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A document error with the offending source snippet.
    Input(InputAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Input(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Input(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Input(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Input(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Input(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Input(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`ProfileError`] into a reportable error.
pub fn to_reportable(err: &ProfileError) -> Reportable<'_> {
    match err {
        ProfileError::Input { err, src } => Reportable::Input(InputAdapter::new(err, src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

#[cfg(test)]
mod tests {
    use bohrprofil::ProfileBuilder;

    use super::*;

    #[test]
    fn test_input_error_has_source_label() {
        let source = "[[geology]]\nfrom = = 0\n";
        let err = ProfileBuilder::default().parse(source).unwrap_err();

        let reportable = to_reportable(&err);
        assert!(matches!(reportable, Reportable::Input(_)));
        assert!(reportable.source_code().is_some());

        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        assert!(labels[0].offset() >= source.find("from").unwrap());
    }

    #[test]
    fn test_layout_error() {
        let err = ProfileError::Layout("`pixels_per_meter` must be a positive number".to_string());

        let reportable = to_reportable(&err);
        match &reportable {
            Reportable::Error(e) => {
                assert!(e.to_string().starts_with("Layout error:"));
            }
            Reportable::Input(_) => panic!("Expected Error"),
        }
        assert_eq!(
            reportable.code().map(|c| c.to_string()).as_deref(),
            Some("bohrprofil::layout")
        );
        assert!(reportable.labels().is_none());
    }

    #[test]
    fn test_rendered_report_contains_snippet() {
        let source = "[[geology]]\nfrom = = 0\n";
        let err = ProfileBuilder::default().parse(source).unwrap_err();

        let mut writer = String::new();
        miette::GraphicalReportHandler::new_themed(miette::GraphicalTheme::unicode_nocolor())
            .render_report(&mut writer, &to_reportable(&err))
            .unwrap();
        assert!(writer.contains("from = = 0"));
    }
}
