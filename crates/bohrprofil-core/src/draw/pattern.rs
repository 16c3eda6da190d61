//! Tiled fill patterns (hatching, dots, slots).
//!
//! A [`PatternDefinition`] describes one square tile: an optional background
//! color and a list of [`PatternMark`]s drawn on top of it. Tiles are placed in
//! user space (`patternUnits="userSpaceOnUse"`), so the hatching of two
//! neighbouring intervals lines up across the boundary.

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::SvgNode,
    geometry::Point,
};

/// A single mark inside a pattern tile.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternMark {
    /// A filled circle
    Dot {
        center: Point,
        radius: f32,
        color: Color,
    },
    /// A straight line segment
    Segment {
        from: Point,
        to: Point,
        color: Color,
        width: f32,
    },
}

impl PatternMark {
    /// Creates a dot mark.
    pub fn dot(x: f32, y: f32, radius: f32, color: Color) -> Self {
        Self::Dot {
            center: Point::new(x, y),
            radius,
            color,
        }
    }

    /// Creates a segment mark.
    pub fn segment(from: (f32, f32), to: (f32, f32), color: Color, width: f32) -> Self {
        Self::Segment {
            from: Point::new(from.0, from.1),
            to: Point::new(to.0, to.1),
            color,
            width,
        }
    }

    fn to_svg(&self) -> SvgNode {
        match self {
            Self::Dot {
                center,
                radius,
                color,
            } => {
                let mut dot = svg_element::Circle::new()
                    .set("cx", center.x())
                    .set("cy", center.y())
                    .set("r", *radius)
                    .set("fill", color.to_svg_color());
                if color.alpha() < 1.0 {
                    dot = dot.set("fill-opacity", color.alpha());
                }
                Box::new(dot)
            }
            Self::Segment {
                from,
                to,
                color,
                width,
            } => {
                let mut segment = svg_element::Line::new()
                    .set("x1", from.x())
                    .set("y1", from.y())
                    .set("x2", to.x())
                    .set("y2", to.y())
                    .set("stroke", color.to_svg_color())
                    .set("stroke-width", *width);
                if color.alpha() < 1.0 {
                    segment = segment.set("stroke-opacity", color.alpha());
                }
                Box::new(segment)
            }
        }
    }
}

/// A square pattern tile referenced by [`Fill::Pattern`](crate::draw::Fill::Pattern).
///
/// # Examples
///
/// ```
/// # use bohrprofil_core::draw::{PatternDefinition, PatternMark};
/// # use bohrprofil_core::color::Color;
/// let brown = Color::new("saddlebrown").unwrap();
/// let clay = PatternDefinition::new("pat-clay", 10.0)
///     .with_background(Color::new("tan").unwrap().with_alpha(0.3))
///     .with_mark(PatternMark::segment((0.0, 10.0), (10.0, 0.0), brown, 1.0));
///
/// assert_eq!(clay.id(), "pat-clay");
/// assert_eq!(clay.marks().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PatternDefinition {
    id: String,
    tile: f32,
    background: Option<Color>,
    marks: Vec<PatternMark>,
}

impl PatternDefinition {
    /// Creates an empty tile of the given edge length.
    pub fn new(id: impl Into<String>, tile: f32) -> Self {
        Self {
            id: id.into(),
            tile,
            background: None,
            marks: Vec::new(),
        }
    }

    /// Sets the tile background; the color alpha becomes the fill opacity.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Appends a mark to the tile.
    pub fn with_mark(mut self, mark: PatternMark) -> Self {
        self.marks.push(mark);
        self
    }

    /// Returns the pattern id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the tile edge length.
    pub fn tile(&self) -> f32 {
        self.tile
    }

    /// Returns the background color, if any.
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Returns the marks drawn on the tile.
    pub fn marks(&self) -> &[PatternMark] {
        &self.marks
    }

    /// Renders the `<pattern>` element.
    pub fn to_svg(&self) -> SvgNode {
        let mut pattern = svg_element::Pattern::new()
            .set("id", self.id.as_str())
            .set("width", self.tile)
            .set("height", self.tile)
            .set("patternUnits", "userSpaceOnUse");

        if let Some(background) = self.background {
            let mut rect = svg_element::Rectangle::new()
                .set("width", self.tile)
                .set("height", self.tile)
                .set("fill", background.to_svg_color());
            if background.alpha() < 1.0 {
                rect = rect.set("fill-opacity", background.alpha());
            }
            pattern = pattern.add(rect);
        }

        for mark in &self.marks {
            pattern = pattern.add(mark.to_svg());
        }

        Box::new(pattern)
    }
}
