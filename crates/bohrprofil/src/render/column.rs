//! Geology column: one patterned rectangle per interval, boundary depths and
//! leader labels.

use bohrprofil_core::{
    color::Color,
    draw::{
        LayeredOutput, LinePrimitive, Primitive, RectPrimitive, RenderLayer, StrokeDefinition,
        TextDefinition, TextPrimitive,
    },
    geometry::{Point, Size},
};

use super::{
    RenderContext, display_text, format_depth,
    labels::{LaneLabel, render_lane},
};
use crate::{
    layout::{Band, DepthScale},
    model::{Column, ColumnRole, DepthInterval},
    style::Style,
};

const BOUNDARY_TICK: f32 = 6.0;
const BOUNDARY_FONT_SIZE: u16 = 10;

/// Rectangle covering `interval` in `band`.
///
/// The height is `(end - start) * pixels_per_meter`, so the rectangle spans
/// exactly the depth range of the interval.
pub(super) fn interval_rect(
    scale: &DepthScale,
    band: Band,
    role: ColumnRole,
    interval: &DepthInterval,
    style: Style,
    stroke_width: f32,
) -> RectPrimitive {
    RectPrimitive::at(
        Point::new(band.left(), scale.depth_to_y(interval.start())),
        Size::new(band.width(), scale.span(interval.start(), interval.end())),
    )
    .with_fill(style.fill())
    .with_stroke(StrokeDefinition::solid(Color::default(), stroke_width))
    .with_class(format!("interval {} style-{}", role.name(), style.id()))
}

/// Short tick and depth text right of the column at `depth`.
fn boundary_mark(output: &mut LayeredOutput, scale: &DepthScale, band: Band, depth: f32) {
    let y = scale.depth_to_y(depth);
    let tick = LinePrimitive::new(
        Point::new(band.right(), y),
        Point::new(band.right() + BOUNDARY_TICK, y),
    )
    .with_class("boundary");
    output.add_to_layer(RenderLayer::Axis, Primitive::Line(tick));

    let text = TextPrimitive::new(
        Point::new(band.right() + BOUNDARY_TICK + 2.0, y - 2.0),
        vec![format_depth(depth)],
        TextDefinition::new(BOUNDARY_FONT_SIZE),
    )
    .with_class("boundary-label");
    output.add_to_layer(RenderLayer::Text, Primitive::Text(text));
}

pub(super) fn render_geology(ctx: &mut RenderContext<'_>, column: &Column) -> LayeredOutput {
    let mut output = LayeredOutput::new();
    let intervals = column.renderable();
    if intervals.is_empty() {
        return output;
    }

    let layout = ctx.layout().clone();
    let scale = layout.scale();
    let band = layout.geology();
    let label_start = ctx.labels_start_at(ColumnRole::Geology);
    let mut lane_labels = Vec::with_capacity(intervals.len());

    for (idx, interval) in intervals.iter().enumerate() {
        let style = ctx.classify(ColumnRole::Geology, interval);
        let rect = interval_rect(scale, band, ColumnRole::Geology, interval, style, 1.0);
        output.add_to_layer(RenderLayer::Column, Primitive::Rect(rect));

        if idx == 0 && label_start {
            boundary_mark(&mut output, scale, band, interval.start());
        }
        boundary_mark(&mut output, scale, band, interval.end());

        lane_labels.push(LaneLabel {
            anchor_y: scale.depth_to_y((interval.start() + interval.end()) / 2.0),
            text: display_text(interval).to_string(),
        });
    }

    let (min_y, max_y) = ctx.label_range();
    output.merge(render_lane(
        &lane_labels,
        band.right(),
        layout.geology_lane(),
        min_y,
        max_y,
    ));
    output
}
