//! Layer-based collection of drawing primitives.
//!
//! Emitters do not write markup. They append [`Primitive`] records to a
//! [`LayeredOutput`] together with the [`RenderLayer`] the record belongs to.
//! The layer decides the z-order in the final document: casing bands are
//! emitted on [`RenderLayer::Casing`] so they always cover the annulus bands
//! on [`RenderLayer::Column`], no matter which emitter ran first.
//!
//! # Example
//!
//! ```
//! # use bohrprofil_core::draw::{LayeredOutput, LinePrimitive, Primitive, RenderLayer};
//! # use bohrprofil_core::geometry::Point;
//! let mut output = LayeredOutput::new();
//! let tick = LinePrimitive::new(Point::new(70.0, 180.0), Point::new(80.0, 180.0));
//! output.add_to_layer(RenderLayer::Axis, Primitive::Line(tick));
//! assert_eq!(output.len(), 1);
//! ```

use crate::draw::Primitive;

/// Defines the rendering layers of a profile drawing.
///
/// Layers are rendered from bottom to top in the order defined by variant declaration.
/// The `Ord` derive uses declaration order, so the first variant renders first (bottom),
/// and the last variant renders last (top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas background
    Background,
    /// Title block frame and table rules
    Frame,
    /// Geology intervals and annulus bands
    Column,
    /// Casing bands, drawn over the annulus
    Casing,
    /// Depth axis, ticks and boundary marks
    Axis,
    /// Leader lines between intervals and their labels
    Leader,
    /// Water level and pump symbols
    Marker,
    /// All text
    Text,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Frame => "frame",
            Self::Column => "column",
            Self::Casing => "casing",
            Self::Axis => "axis",
            Self::Leader => "leader",
            Self::Marker => "marker",
            Self::Text => "text",
        }
    }
}

/// Drawing primitives grouped by rendering layer.
///
/// Records keep their insertion order within a layer; [`LayeredOutput::into_sorted`]
/// performs a stable sort by layer so the draw order inside a layer is exactly
/// the emission order.
#[derive(Debug, Default, Clone)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, Primitive)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single primitive to the specified layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, primitive: Primitive) {
        self.items.push((layer, primitive));
    }

    /// Merges all records from another `LayeredOutput` into this one.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if no primitive was added.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of primitives in all layers.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterates over the records in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &(RenderLayer, Primitive)> {
        self.items.iter()
    }

    /// Consumes the output and returns the records in rendering order.
    pub fn into_sorted(mut self) -> Vec<(RenderLayer, Primitive)> {
        // Stable sort keeps the emission order inside each layer
        self.items.sort_by_key(|(layer, _)| *layer);
        self.items
    }
}
