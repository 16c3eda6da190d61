//! Drawing primitives and document assembly
//!
//! Emitters describe what they draw as [`Primitive`] records on a
//! [`RenderLayer`]; [`DrawingBuilder`] collects them together with the
//! [`PatternDefinition`]s they reference and serializes the result.

mod drawing;
mod fill;
mod layer;
mod pattern;
mod primitive;
mod stroke;
mod text;

pub use drawing::{DrawingBuilder, VectorDrawing};
pub use fill::Fill;
pub use layer::{LayeredOutput, RenderLayer};
pub use pattern::{PatternDefinition, PatternMark};
pub use primitive::{
    LinePrimitive, PathCommand, PathPrimitive, Primitive, RectPrimitive, TextPrimitive,
};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::{Text, TextAnchor, TextDefinition};

use crate::geometry::Point;

/// A boxed SVG node as produced by the serializers.
pub type SvgNode = Box<dyn svg::Node>;

/// Something that can be placed at a position.
pub trait Drawable: std::fmt::Debug {
    fn render_to_layers(&self, position: Point) -> LayeredOutput;
}
