//! Fill definitions for closed primitives.

use crate::color::Color;

/// How the inside of a rectangle or closed path is painted.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Fill {
    /// No fill (`fill="none"`)
    #[default]
    None,
    /// A plain color; its alpha becomes `fill-opacity`
    Solid(Color),
    /// A reference to a pattern definition by id
    Pattern(String),
}

impl Fill {
    /// Fill referencing the pattern with the given id.
    pub fn pattern(id: impl Into<String>) -> Self {
        Self::Pattern(id.into())
    }

    /// Returns the SVG `fill` attribute value.
    pub fn to_svg_value(&self) -> String {
        match self {
            Self::None => "none".to_string(),
            Self::Solid(color) => color.to_svg_color(),
            Self::Pattern(id) => format!("url(#{id})"),
        }
    }

    /// Returns the `fill-opacity` value if the fill is translucent.
    pub fn opacity(&self) -> Option<f32> {
        match self {
            Self::Solid(color) if color.alpha() < 1.0 => Some(color.alpha()),
            _ => None,
        }
    }

    /// Returns the referenced pattern id, if any.
    pub fn pattern_id(&self) -> Option<&str> {
        match self {
            Self::Pattern(id) => Some(id),
            _ => None,
        }
    }
}

/// Apply the fill attributes to an SVG element.
#[macro_export]
macro_rules! apply_fill {
    ($element:expr, $fill:expr) => {{
        let mut elem = $element.set("fill", $fill.to_svg_value());
        if let Some(opacity) = $fill.opacity() {
            elem = elem.set("fill-opacity", opacity);
        }
        elem
    }};
}
