//! Color handling for borehole profiles
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Colors are parsed from CSS color strings so pattern
//! tables and configuration files can use the notation found in the legend
//! sheets ("#d2b48c", "saddlebrown", "rgb(92, 64, 51)").

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a CSS color string such as "#ff0000",
    /// "rgb(255, 0, 0)" or "red".
    ///
    /// # Examples
    ///
    /// ```
    /// use bohrprofil_core::color::Color;
    ///
    /// let clay = Color::new("#d2b48c").unwrap();
    /// let water = Color::new("steelblue").unwrap();
    /// assert!(Color::new("#orange").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates a new color with the specified alpha (transparency) value.
    ///
    /// # Examples
    ///
    /// ```
    /// use bohrprofil_core::color::Color;
    ///
    /// let sand = Color::new("gold").unwrap().with_alpha(0.3);
    /// assert!((sand.alpha() - 0.3).abs() < 0.001);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component of this color, between 0.0 (fully
    /// transparent) and 1.0 (fully opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns the color as `#rrggbb` for SVG paint attributes.
    ///
    /// Alpha is dropped; SVG carries it in the separate `*-opacity`
    /// attributes. Every SVG consumer, PDF conversion included, reads this
    /// notation.
    ///
    /// ```
    /// use bohrprofil_core::color::Color;
    ///
    /// let clay = Color::new("tan").unwrap().with_alpha(0.4);
    /// assert_eq!(clay.to_svg_color(), "#d2b48c");
    /// ```
    pub fn to_svg_color(&self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_svg_color())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("saddlebrown").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_color_default() {
        assert_eq!(Color::default().to_string(), "black");
    }

    #[test]
    fn test_color_with_alpha() {
        let color = Color::new("red").unwrap().with_alpha(0.5);
        assert!((color.alpha() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_to_svg_color_is_hex() {
        assert_eq!(Color::default().to_svg_color(), "#000000");
        assert_eq!(Color::new("steelblue").unwrap().to_svg_color(), "#4682b4");
        assert_eq!(Color::new("rgb(92, 64, 51)").unwrap().to_svg_color(), "#5c4033");

        let translucent = Color::new("white").unwrap().with_alpha(0.3);
        assert_eq!(translucent.to_svg_color(), "#ffffff");
        assert!(!translucent.to_svg_color().contains("color("));
    }

    #[test]
    fn test_invalid_color_message() {
        let err = Color::new("#zzzzzz").unwrap_err();
        assert!(err.contains("invalid color"));
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Color::new("red").unwrap());
        assert!(set.contains(&Color::new("red").unwrap()));
        assert!(!set.contains(&Color::new("blue").unwrap()));
    }
}
