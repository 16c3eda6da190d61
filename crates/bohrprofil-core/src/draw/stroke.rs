//! Stroke and line-style definitions.
//!
//! # Overview
//!
//! - [`StrokeDefinition`]: color, width and dash style of a line or outline
//! - [`StrokeStyle`]: solid or dashed
//! - [`apply_stroke!`](crate::apply_stroke!): applies a definition to an SVG element
//!
//! # SVG Attribute Mapping
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"#000000"`, `0.5` |
//! | `width` | `stroke-width` | `2.0` |
//! | `style` | `stroke-dasharray` | `"5,5"` |

use crate::color::Color;

/// Dash pattern of a stroke.
///
/// Dashed lines mark water levels; everything else is drawn solid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5"),
        }
    }
}

/// A stroke definition for lines and outlines.
///
/// # Examples
///
/// ```
/// use bohrprofil_core::draw::{StrokeDefinition, StrokeStyle};
/// use bohrprofil_core::color::Color;
///
/// let outline = StrokeDefinition::solid(Color::default(), 1.0);
/// assert_eq!(*outline.style(), StrokeStyle::Solid);
///
/// let water = StrokeDefinition::dashed(Color::new("steelblue").unwrap(), 1.0);
/// assert_eq!(water.style().to_svg_value().as_deref(), Some("5,5"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a new solid stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Creates a solid stroke (convenience constructor).
    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    /// Creates a dashed stroke (convenience constructor).
    pub fn dashed(color: Color, width: f32) -> Self {
        Self::new(color, width).with_style(StrokeStyle::Dashed)
    }

    /// Returns the stroke with the given dash style (builder style).
    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the stroke style.
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// # Examples
///
/// ```
/// use bohrprofil_core::draw::StrokeDefinition;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::default();
/// let line = svg_element::Line::new()
///     .set("x1", 0)
///     .set("x2", 10);
///
/// let line = bohrprofil_core::apply_stroke!(line, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let color = $stroke.color();
        let mut elem = $element
            .set("stroke", color.to_svg_color())
            .set("stroke-width", $stroke.width());

        if color.alpha() < 1.0 {
            elem = elem.set("stroke-opacity", color.alpha());
        }

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
