//! Water level and pump intake symbols.
//!
//! Every marker gets a level line at exactly `depth_to_y(depth)`, a symbol
//! on the column centerline and a short caption.

use bohrprofil_core::{
    color::Color,
    draw::{
        Fill, LayeredOutput, LinePrimitive, PathPrimitive, Primitive, RectPrimitive, RenderLayer,
        StrokeDefinition, TextDefinition, TextPrimitive,
    },
    geometry::{Point, Size},
};
use log::warn;

use super::RenderContext;
use crate::model::{MarkerRole, ReferenceMarker};

const WATER_COLOR: &str = "steelblue";
const PUMP_COLOR: &str = "#8b0000";

/// How far the level line reaches past the column on each side.
const LEVEL_OVERHANG: f32 = 12.0;
const TRIANGLE_HALF_WIDTH: f32 = 6.0;
const TRIANGLE_HEIGHT: f32 = 10.0;
const PUMP_WIDTH: f32 = 12.0;
const PUMP_HEIGHT: f32 = 18.0;
const CAPTION_FONT_SIZE: u16 = 10;

fn role_color(role: MarkerRole) -> Color {
    let css = match role {
        MarkerRole::StaticWater | MarkerRole::DrawdownWater => WATER_COLOR,
        MarkerRole::PumpIntake => PUMP_COLOR,
    };
    Color::new(css).unwrap_or_default()
}

/// Downward pointing triangle with its tip on the level line.
fn water_triangle(center_x: f32, y: f32, fill: Fill, color: Color) -> PathPrimitive {
    PathPrimitive::polygon(&[
        Point::new(center_x - TRIANGLE_HALF_WIDTH, y - TRIANGLE_HEIGHT),
        Point::new(center_x + TRIANGLE_HALF_WIDTH, y - TRIANGLE_HEIGHT),
        Point::new(center_x, y),
    ])
    .with_fill(fill)
    .with_stroke(Some(StrokeDefinition::solid(color, 1.2)))
}

pub(super) fn render_markers(ctx: &RenderContext<'_>, markers: &[ReferenceMarker]) -> LayeredOutput {
    let mut output = LayeredOutput::new();
    let layout = ctx.layout();
    let scale = layout.scale();
    let center_x = layout.marker_x();
    let half_width = layout
        .construction()
        .map(|construction| construction.annulus().width())
        .unwrap_or(layout.geology().width())
        / 2.0;
    let captions = ctx.config().markers();

    for marker in markers {
        if !marker.is_renderable() {
            warn!(role = marker.role().name(), depth = marker.depth(); "Skipping marker");
            continue;
        }
        let role = marker.role();
        let color = role_color(role);
        let y = scale.depth_to_y(marker.depth());
        let role_class = format!("marker-{}", role.name());

        let level_stroke = match role {
            MarkerRole::StaticWater | MarkerRole::DrawdownWater => {
                StrokeDefinition::dashed(color, 1.0)
            }
            MarkerRole::PumpIntake => StrokeDefinition::solid(color, 1.0),
        };
        let level = LinePrimitive::new(
            Point::new(center_x - half_width - LEVEL_OVERHANG, y),
            Point::new(center_x + half_width + LEVEL_OVERHANG, y),
        )
        .with_stroke(level_stroke)
        .with_class(format!("marker-level {role_class}"));
        output.add_to_layer(RenderLayer::Marker, Primitive::Line(level));

        match role {
            MarkerRole::StaticWater => {
                let white = Color::new("white").unwrap_or_default();
                let glyph = water_triangle(center_x, y, Fill::Solid(white), color)
                    .with_class(format!("marker-symbol {role_class}"));
                output.add_to_layer(RenderLayer::Marker, Primitive::Path(glyph));
            }
            MarkerRole::DrawdownWater => {
                let glyph = water_triangle(center_x, y, Fill::Solid(color), color)
                    .with_class(format!("marker-symbol {role_class}"));
                output.add_to_layer(RenderLayer::Marker, Primitive::Path(glyph));
            }
            MarkerRole::PumpIntake => {
                let body = RectPrimitive::at(
                    Point::new(center_x - PUMP_WIDTH / 2.0, y - PUMP_HEIGHT),
                    Size::new(PUMP_WIDTH, PUMP_HEIGHT),
                )
                .with_fill(Fill::Solid(color))
                .with_stroke(StrokeDefinition::default())
                .with_class(format!("marker-symbol {role_class}"));
                output.add_to_layer(RenderLayer::Marker, Primitive::Rect(body));

                // A pump just below the datum must not get a riser above it
                let datum_y = scale.depth_to_y(0.0);
                let riser = LinePrimitive::new(
                    Point::new(center_x, (y - PUMP_HEIGHT).max(datum_y)),
                    Point::new(center_x, datum_y),
                )
                .with_stroke(StrokeDefinition::solid(color, 2.0))
                .with_class(format!("marker-riser {role_class}"));
                output.add_to_layer(RenderLayer::Marker, Primitive::Line(riser));
            }
        }

        let caption = captions.caption(role);
        if !caption.is_empty() {
            let text = TextPrimitive::new(
                Point::new(center_x + half_width + LEVEL_OVERHANG + 2.0, y - 3.0),
                vec![caption.to_string()],
                TextDefinition::new(CAPTION_FONT_SIZE)
                    .with_bold(true)
                    .with_color(color),
            )
            .with_class(format!("marker-label {role_class}"));
            output.add_to_layer(RenderLayer::Text, Primitive::Text(text));
        }
    }

    output
}
