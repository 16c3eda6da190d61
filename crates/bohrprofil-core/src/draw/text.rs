//! Text styling, measurement and wrapping.
//!
//! Measurements are estimates derived from the character count and font size,
//! not from font metrics. The result is identical on every machine, which keeps
//! the label layout and therefore the whole document deterministic.
//!
//! # Overview
//!
//! - [`TextDefinition`] - Reusable text style configuration
//! - [`Text`] - A renderable text element combining content with a [`TextDefinition`]
//!
//! ```
//! # use bohrprofil_core::draw::{Text, TextDefinition};
//! let style = TextDefinition::new(12);
//! let text = Text::new(&style, "Mittelsand, kiesig");
//! let lines = text.wrap(60.0);
//! assert!(lines.len() > 1);
//! ```

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, Primitive, RenderLayer, TextPrimitive},
    geometry::Point,
};

/// Average glyph advance as a fraction of the font size.
const AVERAGE_GLYPH_WIDTH: f32 = 0.55;

/// Horizontal alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    /// Returns the SVG `text-anchor` value.
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Visual style of a text block.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | inherited from the document |
/// | Bold | `false` |
/// | Color | `None` (SVG default, black) |
/// | Anchor | [`TextAnchor::Start`] |
/// | Vertical centering | `false` |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: Option<String>,
    font_size: u16,
    bold: bool,
    color: Option<Color>,
    anchor: TextAnchor,
    centered_vertically: bool,
}

impl TextDefinition {
    /// Creates a definition with the given font size in pixels.
    pub fn new(font_size: u16) -> Self {
        Self {
            font_family: None,
            font_size,
            bold: false,
            color: None,
            anchor: TextAnchor::Start,
            centered_vertically: false,
        }
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Treats the anchor y as the vertical center of the block.
    pub fn with_vertical_centering(mut self, centered: bool) -> Self {
        self.centered_vertically = centered;
        self
    }

    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn bold(&self) -> bool {
        self.bold
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    pub fn centered_vertically(&self) -> bool {
        self.centered_vertically
    }

    /// Distance between two baselines.
    pub fn line_height(&self) -> f32 {
        f32::from(self.font_size) * 6.0 / 5.0
    }

    /// Estimated advance width of `content` on a single line.
    pub fn estimate_width(&self, content: &str) -> f32 {
        let factor = if self.bold {
            AVERAGE_GLYPH_WIDTH * 1.1
        } else {
            AVERAGE_GLYPH_WIDTH
        };
        content.chars().count() as f32 * f32::from(self.font_size) * factor
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self::new(12)
    }
}

/// A text element combining content with a [`TextDefinition`].
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    pub fn content(&self) -> &str {
        self.content
    }

    /// Splits the content into lines no wider than `max_width`.
    ///
    /// Words are filled greedily. Explicit newlines start a new line, and a
    /// single word wider than `max_width` is kept whole on its own line.
    pub fn wrap(&self, max_width: f32) -> Vec<String> {
        let mut lines = Vec::new();

        for paragraph in self.content.lines() {
            let mut current = String::new();
            for word in paragraph.split_whitespace() {
                if current.is_empty() {
                    current.push_str(word);
                    continue;
                }
                let candidate = format!("{current} {word}");
                if self.definition.estimate_width(&candidate) <= max_width {
                    current = candidate;
                } else {
                    lines.push(std::mem::replace(&mut current, word.to_string()));
                }
            }
            if !current.is_empty() {
                lines.push(current);
            }
        }

        lines
    }
}

impl Drawable for Text<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let lines: Vec<String> = self.content.lines().map(str::to_string).collect();
        if lines.is_empty() {
            return output;
        }
        let primitive = TextPrimitive::new(position, lines, self.definition.clone());
        output.add_to_layer(RenderLayer::Text, Primitive::Text(primitive));
        output
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_estimate_width() {
        let def = TextDefinition::new(10);
        assert_approx_eq!(f32, def.estimate_width("abcd"), 22.0, epsilon = 0.001);
        assert_approx_eq!(f32, def.estimate_width(""), 0.0);
        // Umlauts count as one character
        assert_approx_eq!(f32, def.estimate_width("Öl"), 11.0, epsilon = 0.001);
    }

    #[test]
    fn test_line_height() {
        assert_approx_eq!(f32, TextDefinition::new(10).line_height(), 12.0);
        assert_approx_eq!(f32, TextDefinition::new(12).line_height(), 14.4, epsilon = 0.001);
    }

    #[test]
    fn test_wrap_greedy() {
        let def = TextDefinition::new(10);
        // 5.5 px per character, 60 px fits 10 characters
        let lines = Text::new(&def, "Mittelsand stark kiesig").wrap(60.0);
        assert_eq!(lines, vec!["Mittelsand", "stark", "kiesig"]);

        let lines = Text::new(&def, "Ton, fest").wrap(60.0);
        assert_eq!(lines, vec!["Ton, fest"]);
    }

    #[test]
    fn test_wrap_keeps_long_words_and_newlines() {
        let def = TextDefinition::new(10);
        let lines = Text::new(&def, "Grobsandsteinbank\nKluft").wrap(30.0);
        assert_eq!(lines, vec!["Grobsandsteinbank", "Kluft"]);
        assert!(Text::new(&def, "   ").wrap(100.0).is_empty());
    }

    #[test]
    fn test_render_to_layers() {
        let def = TextDefinition::new(12);
        let output = Text::new(&def, "Vollrohr").render_to_layers(Point::new(5.0, 5.0));
        let sorted = output.into_sorted();
        assert_eq!(sorted.len(), 1);
        assert_eq!(sorted[0].0, RenderLayer::Text);

        let empty = Text::new(&def, "").render_to_layers(Point::default());
        assert!(empty.is_empty());
    }
}
