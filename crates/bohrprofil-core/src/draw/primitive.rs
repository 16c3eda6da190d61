//! Drawing primitives collected by the emitters.
//!
//! A [`Primitive`] is a plain record (geometry, paint and a CSS class). Keeping
//! records instead of finished SVG nodes lets the renderer and the tests look
//! at what was drawn before it is serialized.

use svg::node::{Text as SvgText, element as svg_element};

use crate::{
    apply_fill, apply_stroke,
    draw::{Fill, StrokeDefinition, SvgNode, TextAnchor, TextDefinition},
    geometry::{Bounds, Point, Size},
};

/// One drawable record.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect(RectPrimitive),
    Line(LinePrimitive),
    Path(PathPrimitive),
    Text(TextPrimitive),
}

impl Primitive {
    /// Returns the CSS class list of the record, if any.
    pub fn class(&self) -> Option<&str> {
        match self {
            Self::Rect(rect) => rect.class.as_deref(),
            Self::Line(line) => line.class.as_deref(),
            Self::Path(path) => path.class.as_deref(),
            Self::Text(text) => text.class.as_deref(),
        }
    }

    /// Returns `true` if the class list contains `class` as a whole word.
    pub fn has_class(&self, class: &str) -> bool {
        self.class()
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    /// Serializes the record into an SVG node.
    pub fn to_svg(&self) -> SvgNode {
        match self {
            Self::Rect(rect) => rect.to_svg(),
            Self::Line(line) => line.to_svg(),
            Self::Path(path) => path.to_svg(),
            Self::Text(text) => text.to_svg(),
        }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RectPrimitive {
    origin: Point,
    size: Size,
    fill: Fill,
    stroke: Option<StrokeDefinition>,
    class: Option<String>,
}

impl RectPrimitive {
    /// Creates an unfilled rectangle without outline from its top-left
    /// corner and size.
    ///
    /// The size is kept as given, so the serialized `height` is exactly the
    /// computed span and not a difference of two coordinates.
    pub fn at(origin: Point, size: Size) -> Self {
        Self {
            origin,
            size,
            fill: Fill::None,
            stroke: None,
            class: None,
        }
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_stroke(mut self, stroke: StrokeDefinition) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.origin, self.size)
    }

    pub fn fill(&self) -> &Fill {
        &self.fill
    }

    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }

    fn to_svg(&self) -> SvgNode {
        let mut rect = svg_element::Rectangle::new()
            .set("x", self.origin.x())
            .set("y", self.origin.y())
            .set("width", self.size.width())
            .set("height", self.size.height());
        rect = apply_fill!(rect, &self.fill);
        if let Some(stroke) = &self.stroke {
            rect = apply_stroke!(rect, stroke);
        }
        if let Some(class) = &self.class {
            rect = rect.set("class", class.as_str());
        }
        Box::new(rect)
    }
}

/// A straight line between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePrimitive {
    from: Point,
    to: Point,
    stroke: StrokeDefinition,
    class: Option<String>,
}

impl LinePrimitive {
    /// Creates a line with the default 1px black stroke.
    pub fn new(from: Point, to: Point) -> Self {
        Self {
            from,
            to,
            stroke: StrokeDefinition::default(),
            class: None,
        }
    }

    pub fn with_stroke(mut self, stroke: StrokeDefinition) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }

    fn to_svg(&self) -> SvgNode {
        let mut line = svg_element::Line::new()
            .set("x1", self.from.x())
            .set("y1", self.from.y())
            .set("x2", self.to.x())
            .set("y2", self.to.y());
        line = apply_stroke!(line, &self.stroke);
        if let Some(class) = &self.class {
            line = line.set("class", class.as_str());
        }
        Box::new(line)
    }
}

/// A single path command in absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Close,
}

/// A polyline or polygon built from [`PathCommand`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    commands: Vec<PathCommand>,
    fill: Fill,
    stroke: Option<StrokeDefinition>,
    class: Option<String>,
}

impl PathPrimitive {
    /// Creates an open polyline through `points`.
    pub fn polyline(points: &[Point]) -> Self {
        let commands = points
            .iter()
            .enumerate()
            .map(|(idx, point)| {
                if idx == 0 {
                    PathCommand::MoveTo(*point)
                } else {
                    PathCommand::LineTo(*point)
                }
            })
            .collect();
        Self {
            commands,
            fill: Fill::None,
            stroke: Some(StrokeDefinition::default()),
            class: None,
        }
    }

    /// Creates a closed polygon through `points`.
    pub fn polygon(points: &[Point]) -> Self {
        let mut path = Self::polyline(points);
        path.commands.push(PathCommand::Close);
        path
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_stroke(mut self, stroke: Option<StrokeDefinition>) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Returns the points visited by the path, in order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
            PathCommand::Close => None,
        })
    }

    /// Returns the SVG path data string.
    pub fn data(&self) -> String {
        self.commands
            .iter()
            .map(|cmd| match cmd {
                PathCommand::MoveTo(p) => format!("M {} {}", p.x(), p.y()),
                PathCommand::LineTo(p) => format!("L {} {}", p.x(), p.y()),
                PathCommand::Close => "Z".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn to_svg(&self) -> SvgNode {
        let mut path = svg_element::Path::new().set("d", self.data());
        path = apply_fill!(path, &self.fill);
        if let Some(stroke) = &self.stroke {
            path = apply_stroke!(path, stroke);
        }
        if let Some(class) = &self.class {
            path = path.set("class", class.as_str());
        }
        Box::new(path)
    }
}

/// A text block anchored at `position`.
///
/// `position.y()` is the baseline of the first line for top-aligned text and
/// the visual center of the block for [`TextDefinition::centered_vertically`]
/// text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    position: Point,
    lines: Vec<String>,
    definition: TextDefinition,
    class: Option<String>,
}

impl TextPrimitive {
    pub fn new(position: Point, lines: Vec<String>, definition: TextDefinition) -> Self {
        Self {
            position,
            lines,
            definition,
            class: None,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn definition(&self) -> &TextDefinition {
        &self.definition
    }

    /// Returns all lines joined by a newline.
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    fn to_svg(&self) -> SvgNode {
        let def = &self.definition;
        let line_height = def.line_height();

        let mut y = self.position.y();
        if def.centered_vertically() && self.lines.len() > 1 {
            y -= line_height * (self.lines.len() - 1) as f32 / 2.0;
        }

        let mut text = svg_element::Text::new("")
            .set("x", self.position.x())
            .set("y", y)
            .set("font-size", def.font_size());

        if def.anchor() != TextAnchor::Start {
            text = text.set("text-anchor", def.anchor().to_svg_value());
        }
        if def.centered_vertically() {
            text = text.set("dominant-baseline", "middle");
        }
        if let Some(family) = def.font_family() {
            text = text.set("font-family", family);
        }
        if def.bold() {
            text = text.set("font-weight", "bold");
        }
        if let Some(color) = def.color() {
            text = text.set("fill", color.to_svg_color());
            if color.alpha() < 1.0 {
                text = text.set("fill-opacity", color.alpha());
            }
        }
        if let Some(class) = &self.class {
            text = text.set("class", class.as_str());
        }

        if let [line] = self.lines.as_slice() {
            text = text.add(SvgText::new(line.as_str()));
        } else {
            for (idx, line) in self.lines.iter().enumerate() {
                let dy = if idx == 0 { 0.0 } else { line_height };
                let tspan = svg_element::TSpan::new("")
                    .set("x", self.position.x())
                    .set("dy", dy)
                    .add(SvgText::new(line.as_str()));
                text = text.add(tspan);
            }
        }

        Box::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_rect_markup() {
        let rect = RectPrimitive::at(Point::new(80.0, 180.0), Size::new(120.0, 40.0))
            .with_fill(Fill::pattern("pat-clay"))
            .with_stroke(StrokeDefinition::default())
            .with_class("interval geology style-clay");
        let primitive = Primitive::Rect(rect);

        let markup = primitive.to_svg().to_string();
        assert!(markup.contains("x=\"80\""));
        assert!(markup.contains("y=\"180\""));
        assert!(markup.contains("height=\"40\""));
        assert!(markup.contains("fill=\"url(#pat-clay)\""));
        assert!(primitive.has_class("geology"));
        assert!(!primitive.has_class("geo"));
    }

    #[test]
    fn test_path_data() {
        let path = PathPrimitive::polygon(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 8.0),
        ]);
        assert_eq!(path.data(), "M 0 0 L 10 0 L 5 8 Z");
        assert_eq!(path.points().count(), 3);
    }

    #[test]
    fn test_text_escapes_content() {
        let text = TextPrimitive::new(
            Point::new(10.0, 20.0),
            vec!["Sand & Kies <fein>".to_string()],
            TextDefinition::new(12),
        );
        let markup = Primitive::Text(text).to_svg().to_string();
        assert!(markup.contains("Sand &amp; Kies &lt;fein&gt;"));
        assert!(!markup.contains("<tspan"));
    }

    #[test]
    fn test_multiline_text_uses_tspans() {
        let def = TextDefinition::new(10).with_color(Color::new("navy").unwrap());
        let text = TextPrimitive::new(
            Point::new(0.0, 100.0),
            vec!["Feinsand,".to_string(), "schluffig".to_string()],
            def,
        );
        let markup = Primitive::Text(text).to_svg().to_string();
        assert_eq!(markup.matches("<tspan").count(), 2);
        assert!(markup.contains("dy=\"12\""));
    }
}
