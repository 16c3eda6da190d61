//! Profile document parsing.
//!
//! A profile document is TOML:
//!
//! ```toml
//! [metadata]
//! company = "Brunnenbau Muster GmbH"
//! project = "Brunnen 3"
//!
//! [[geology]]
//! from = 0.0
//! to = 0.4
//! category = "Mutterboden"
//! label = "Mutterboden, humos"
//!
//! [[casing]]
//! von = "0,0"
//! bis = "12,5"
//! material = "Vollrohr"
//!
//! [[markers]]
//! depth = 4.2
//! role = "staticWater"
//! ```
//!
//! Parsing is lenient below the syntax level. A row whose depths cannot be
//! read is skipped with a warning and the remaining rows are kept. Depths that
//! parse but form an invalid range are kept; the renderer skips them.

use std::{collections::BTreeMap, ops::Range};

use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::model::{ColumnRole, DepthInterval, ProfileInput, ReferenceMarker};

/// A profile document that is not valid TOML or does not have the expected
/// structure.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct InputError {
    message: String,
    span: Option<Range<usize>>,
}

impl InputError {
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte range of the offending part of the source, when known.
    pub fn span(&self) -> Option<Range<usize>> {
        self.span.clone()
    }
}

impl From<toml::de::Error> for InputError {
    fn from(err: toml::de::Error) -> Self {
        Self {
            message: err.message().to_string(),
            span: err.span(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProfileDocument {
    metadata: BTreeMap<String, toml::Value>,
    #[serde(alias = "schichten")]
    geology: Vec<IntervalRow>,
    #[serde(alias = "verrohrung")]
    casing: Vec<IntervalRow>,
    #[serde(alias = "ringraum")]
    annulus: Vec<IntervalRow>,
    markers: Vec<MarkerRow>,
}

#[derive(Debug, Deserialize)]
struct IntervalRow {
    #[serde(default, alias = "von")]
    from: Option<DepthValue>,
    #[serde(default, alias = "bis")]
    to: Option<DepthValue>,
    #[serde(default, alias = "material")]
    category: String,
    #[serde(default, alias = "beschriftung")]
    label: String,
}

impl IntervalRow {
    fn into_interval(self) -> Option<DepthInterval> {
        let start = self.from.as_ref().and_then(DepthValue::meters)?;
        let end = self.to.as_ref().and_then(DepthValue::meters)?;
        Some(DepthInterval::new(start, end, self.category, self.label))
    }
}

#[derive(Debug, Deserialize)]
struct MarkerRow {
    #[serde(default, alias = "tiefe", alias = "depth_meters", alias = "depthMeters")]
    depth: Option<DepthValue>,
    #[serde(default, alias = "rolle")]
    role: String,
}

/// A depth cell as entered: a number, or text such as `"3,5"` or `"12.0 m"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum DepthValue {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl DepthValue {
    fn meters(&self) -> Option<f32> {
        match self {
            Self::Number(value) => Some(*value as f32).filter(|v| v.is_finite()),
            Self::Text(text) => parse_depth(text),
            Self::Other(_) => None,
        }
    }
}

/// Reads a depth in meters from text.
///
/// Accepts a decimal comma and an optional trailing `m` unit.
///
/// ```
/// # use bohrprofil::input::parse_depth;
/// assert_eq!(parse_depth("3,5"), Some(3.5));
/// assert_eq!(parse_depth(" 12.0 m"), Some(12.0));
/// assert_eq!(parse_depth("tief"), None);
/// ```
pub fn parse_depth(text: &str) -> Option<f32> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('m').unwrap_or(trimmed).trim_end();
    if number.is_empty() {
        return None;
    }
    number
        .replace(',', ".")
        .parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
}

fn metadata_text(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(text) => Some(text.clone()),
        toml::Value::Integer(number) => Some(number.to_string()),
        toml::Value::Float(number) => Some(number.to_string()),
        toml::Value::Boolean(flag) => Some(flag.to_string()),
        toml::Value::Datetime(datetime) => Some(datetime.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

/// Parses a profile document.
///
/// # Errors
///
/// Returns [`InputError`] when the source is not valid TOML or a section has
/// the wrong shape (for example `geology` given as a string).
pub fn parse(source: &str) -> Result<ProfileInput, InputError> {
    let document: ProfileDocument = toml::from_str(source)?;
    let mut input = ProfileInput::new();

    for (key, value) in &document.metadata {
        match metadata_text(value) {
            Some(text) => input.metadata_mut().insert(key.as_str(), text),
            None => warn!(key = key.as_str(); "Ignoring structured metadata value"),
        }
    }

    let columns = [
        (ColumnRole::Geology, document.geology),
        (ColumnRole::Casing, document.casing),
        (ColumnRole::Annulus, document.annulus),
    ];
    for (role, rows) in columns {
        for (index, row) in rows.into_iter().enumerate() {
            match row.into_interval() {
                Some(interval) => input.column_mut(role).push(interval),
                None => warn!(
                    column = role.name(), row = index + 1;
                    "Skipping row with unreadable depth",
                ),
            }
        }
    }

    for (index, row) in document.markers.into_iter().enumerate() {
        let Some(depth) = row.depth.as_ref().and_then(DepthValue::meters) else {
            warn!(row = index + 1; "Skipping marker with unreadable depth");
            continue;
        };
        match row.role.parse() {
            Ok(role) => input.push_marker(ReferenceMarker::new(depth, role)),
            Err(err) => warn!(row = index + 1, err; "Skipping marker"),
        }
    }

    debug!(
        geology = input.column(ColumnRole::Geology).intervals().len(),
        casing = input.column(ColumnRole::Casing).intervals().len(),
        annulus = input.column(ColumnRole::Annulus).intervals().len(),
        markers = input.markers().len();
        "Profile document parsed",
    );

    Ok(input)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::model::MarkerRole;

    #[test]
    fn test_parse_english_fields() {
        let input = parse(
            r#"
            [metadata]
            company = "Brunnenbau Muster GmbH"
            project = "Brunnen 3"

            [[geology]]
            from = 0
            to = 0.4
            category = "Mutterboden"
            label = "Mutterboden, humos"

            [[geology]]
            from = 0.4
            to = 3.5
            category = "Sand/Kies"
            label = "Sand, Kies"
            "#,
        )
        .unwrap();

        let geology = input.column(ColumnRole::Geology).intervals();
        assert_eq!(geology.len(), 2);
        assert_approx_eq!(f32, geology[0].start(), 0.0);
        assert_approx_eq!(f32, geology[1].end(), 3.5);
        assert_eq!(geology[1].category(), "Sand/Kies");
        assert_eq!(input.metadata().get("project"), "Brunnen 3");
        assert!(!input.has_construction());
    }

    #[test]
    fn test_parse_german_fields_and_decimal_comma() {
        let input = parse(
            r#"
            [[casing]]
            von = "0,0"
            bis = "12,5"
            material = "Vollrohr"
            beschriftung = "Vollrohr DN 150"

            [[annulus]]
            von = 0
            bis = "3 m"
            material = "Tonsperre"
            "#,
        )
        .unwrap();

        let casing = input.column(ColumnRole::Casing).intervals();
        assert_approx_eq!(f32, casing[0].end(), 12.5);
        assert_eq!(casing[0].label(), "Vollrohr DN 150");

        let annulus = input.column(ColumnRole::Annulus).intervals();
        assert_approx_eq!(f32, annulus[0].end(), 3.0);
        assert_eq!(annulus[0].label(), "");
    }

    #[test]
    fn test_unreadable_rows_are_skipped() {
        let input = parse(
            r#"
            [[geology]]
            from = "oben"
            to = 1.0
            category = "Sand"

            [[geology]]
            from = 1.0
            category = "Kies"

            [[geology]]
            from = true
            to = 2.0

            [[geology]]
            from = 5.0
            to = 3.0
            category = "Kies"
            label = "bad"
            "#,
        )
        .unwrap();

        // Only the inverted row survives parsing; the renderer drops it later
        let geology = input.column(ColumnRole::Geology).intervals();
        assert_eq!(geology.len(), 1);
        assert_eq!(geology[0].label(), "bad");
        assert!(!geology[0].is_renderable());
    }

    #[test]
    fn test_markers() {
        let input = parse(
            r#"
            [[markers]]
            depth = 14.7
            role = "staticWater"

            [[markers]]
            tiefe = "18,2"
            rolle = "BWS"

            [[markers]]
            depth = 3.0
            role = "fountain"

            [[markers]]
            role = "pumpIntake"
            "#,
        )
        .unwrap();

        let markers = input.markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].role(), MarkerRole::StaticWater);
        assert_approx_eq!(f32, markers[1].depth(), 18.2);
        assert_eq!(markers[1].role(), MarkerRole::DrawdownWater);
    }

    #[test]
    fn test_metadata_values() {
        let input = parse(
            r#"
            [metadata]
            date = 2024-05-17
            depth = 42
            extra = { nested = true }
            "#,
        )
        .unwrap();
        assert_eq!(input.metadata().get("date"), "2024-05-17");
        assert_eq!(input.metadata().get("depth"), "42");
        assert_eq!(input.metadata().get("extra"), "");
    }

    #[test]
    fn test_empty_document() {
        let input = parse("").unwrap();
        assert!(input.column(ColumnRole::Geology).is_empty());
        assert!(input.markers().is_empty());
    }

    #[test]
    fn test_syntax_error_has_span() {
        let source = "[[geology]]\nfrom = 0.0\nto = = 1.0\n";
        let err = parse(source).unwrap_err();
        let span = err.span().unwrap();
        assert!(span.start >= source.find("to =").unwrap());
        assert!(!err.message().is_empty());
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        assert!(parse("geology = \"Sand\"").is_err());
    }

    #[test]
    fn test_parse_depth() {
        assert_eq!(parse_depth("0"), Some(0.0));
        assert_eq!(parse_depth("3,5"), Some(3.5));
        assert_eq!(parse_depth("12.25m"), Some(12.25));
        assert_eq!(parse_depth(""), None);
        assert_eq!(parse_depth(" m"), None);
        assert_eq!(parse_depth("1.234,5"), None);
        assert_eq!(parse_depth("inf"), None);
    }
}
