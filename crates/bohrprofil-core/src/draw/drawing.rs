//! Assembly of a complete vector drawing.

use log::debug;
use svg::{Document, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Fill, LayeredOutput, PatternDefinition, Primitive, RectPrimitive, RenderLayer},
    geometry::{Point, Size},
};

/// Collects patterns and layered primitives for one drawing.
///
/// ```
/// # use bohrprofil_core::draw::{DrawingBuilder, LinePrimitive, Primitive, RenderLayer};
/// # use bohrprofil_core::geometry::{Point, Size};
/// let mut builder = DrawingBuilder::new(Size::new(600.0, 400.0));
/// builder.add_to_layer(
///     RenderLayer::Axis,
///     Primitive::Line(LinePrimitive::new(Point::new(80.0, 180.0), Point::new(80.0, 380.0))),
/// );
/// let drawing = builder.finish();
/// assert!(drawing.to_svg().contains("viewBox=\"0 0 600 400\""));
/// ```
#[derive(Debug)]
pub struct DrawingBuilder {
    size: Size,
    font_family: Option<String>,
    patterns: Vec<PatternDefinition>,
    output: LayeredOutput,
}

impl DrawingBuilder {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            font_family: None,
            patterns: Vec::new(),
            output: LayeredOutput::new(),
        }
    }

    /// Fills the whole canvas with `color` below every layer.
    pub fn with_background(mut self, color: Color) -> Self {
        let canvas = RectPrimitive::at(Point::default(), self.size)
            .with_fill(Fill::Solid(color))
            .with_class("background");
        self.output
            .add_to_layer(RenderLayer::Background, Primitive::Rect(canvas));
        self
    }

    /// Sets the document-wide font family.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Registers a pattern. A second pattern with the same id is ignored.
    pub fn add_pattern(&mut self, pattern: PatternDefinition) {
        if self.patterns.iter().any(|p| p.id() == pattern.id()) {
            return;
        }
        self.patterns.push(pattern);
    }

    pub fn add_to_layer(&mut self, layer: RenderLayer, primitive: Primitive) {
        self.output.add_to_layer(layer, primitive);
    }

    pub fn merge(&mut self, output: LayeredOutput) {
        self.output.merge(output);
    }

    pub fn finish(self) -> VectorDrawing {
        let primitives = self.output.into_sorted();
        debug!(
            primitives = primitives.len(),
            patterns = self.patterns.len();
            "Drawing assembled",
        );
        VectorDrawing {
            size: self.size,
            font_family: self.font_family,
            patterns: self.patterns,
            primitives,
        }
    }
}

/// A finished drawing: canvas size, pattern definitions and primitives in
/// rendering order.
#[derive(Debug, Clone)]
pub struct VectorDrawing {
    size: Size,
    font_family: Option<String>,
    patterns: Vec<PatternDefinition>,
    primitives: Vec<(RenderLayer, Primitive)>,
}

impl VectorDrawing {
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.width()
    }

    pub fn height(&self) -> f32 {
        self.size.height()
    }

    pub fn patterns(&self) -> &[PatternDefinition] {
        &self.patterns
    }

    /// Primitives in rendering order, bottom first.
    pub fn primitives(&self) -> &[(RenderLayer, Primitive)] {
        &self.primitives
    }

    /// Primitives whose class list contains `class`.
    pub fn primitives_with_class<'a>(
        &'a self,
        class: &'a str,
    ) -> impl Iterator<Item = &'a Primitive> + 'a {
        self.primitives
            .iter()
            .map(|(_, primitive)| primitive)
            .filter(move |primitive| primitive.has_class(class))
    }

    /// Builds the SVG document.
    ///
    /// Pattern definitions come first, followed by one `<g>` group per run of
    /// primitives on the same layer.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new()
            .set("width", self.width())
            .set("height", self.height())
            .set("viewBox", (0, 0, self.width(), self.height()));
        if let Some(family) = &self.font_family {
            doc = doc.set("font-family", family.as_str());
        }

        if !self.patterns.is_empty() {
            let mut defs = svg_element::Definitions::new();
            for pattern in &self.patterns {
                defs = defs.add(pattern.to_svg());
            }
            doc = doc.add(defs);
        }

        let mut current: Option<(RenderLayer, svg_element::Group)> = None;
        for (layer, primitive) in &self.primitives {
            let group = match current.take() {
                Some((open_layer, group)) if open_layer == *layer => group,
                Some((_, finished)) => {
                    doc = doc.add(finished);
                    svg_element::Group::new().set("data-layer", layer.name())
                }
                None => svg_element::Group::new().set("data-layer", layer.name()),
            };
            current = Some((*layer, group.add(primitive.to_svg())));
        }
        if let Some((_, group)) = current {
            doc = doc.add(group);
        }

        doc
    }

    /// Serializes the drawing to SVG markup.
    pub fn to_svg(&self) -> String {
        self.to_document().to_string()
    }
}
