//! Well construction view: annulus fill with the casing drawn on top.

use std::collections::BTreeMap;

use bohrprofil_core::{
    draw::{
        LayeredOutput, LinePrimitive, Primitive, RenderLayer, TextAnchor, TextDefinition,
        TextPrimitive,
    },
    geometry::Point,
};

use super::{
    RenderContext, column::interval_rect, display_text, format_depth,
    labels::{LaneLabel, render_lane},
};
use crate::{
    layout::ConstructionLayout,
    model::{Column, ColumnRole},
};

const BOUNDARY_TICK: f32 = 6.0;
const BOUNDARY_FONT_SIZE: u16 = 10;
const CASING_STROKE_WIDTH: f32 = 1.2;

/// Collects boundary depths, keyed by centimeter so nearly equal depths of
/// the two columns are labelled once.
fn merged_boundaries<'a>(
    columns: impl IntoIterator<Item = (&'a Column, bool)>,
) -> BTreeMap<i64, f32> {
    let mut boundaries = BTreeMap::new();
    for (column, include_start) in columns {
        for (idx, interval) in column.renderable().into_iter().enumerate() {
            if idx == 0 && include_start {
                boundaries
                    .entry(centimeters(interval.start()))
                    .or_insert(interval.start());
            }
            boundaries
                .entry(centimeters(interval.end()))
                .or_insert(interval.end());
        }
    }
    boundaries
}

fn centimeters(depth: f32) -> i64 {
    (depth * 100.0).round() as i64
}

pub(super) fn render_construction(
    ctx: &mut RenderContext<'_>,
    construction: &ConstructionLayout,
    casing: &Column,
    annulus: &Column,
) -> LayeredOutput {
    let mut output = LayeredOutput::new();
    let layout = ctx.layout().clone();
    let scale = layout.scale();
    let mut lane_labels = Vec::new();

    let parts = [
        (
            annulus,
            ColumnRole::Annulus,
            construction.annulus(),
            RenderLayer::Column,
            1.0,
        ),
        (
            casing,
            ColumnRole::Casing,
            construction.casing(),
            RenderLayer::Casing,
            CASING_STROKE_WIDTH,
        ),
    ];
    for (column, role, band, layer, stroke_width) in parts {
        for interval in column.renderable() {
            let style = ctx.classify(role, interval);
            let rect = interval_rect(scale, band, role, interval, style, stroke_width);
            output.add_to_layer(layer, Primitive::Rect(rect));
            lane_labels.push(LaneLabel {
                anchor_y: scale.depth_to_y((interval.start() + interval.end()) / 2.0),
                text: display_text(interval).to_string(),
            });
        }
    }

    let left = construction.annulus().left();
    let definition = TextDefinition::new(BOUNDARY_FONT_SIZE)
        .with_anchor(TextAnchor::End)
        .with_vertical_centering(true);
    let boundaries = merged_boundaries([
        (casing, ctx.labels_start_at(ColumnRole::Casing)),
        (annulus, ctx.labels_start_at(ColumnRole::Annulus)),
    ]);
    for depth in boundaries.into_values() {
        let y = scale.depth_to_y(depth);
        let tick = LinePrimitive::new(Point::new(left - BOUNDARY_TICK, y), Point::new(left, y))
            .with_class("boundary");
        output.add_to_layer(RenderLayer::Axis, Primitive::Line(tick));

        let text = TextPrimitive::new(
            Point::new(left - BOUNDARY_TICK - 2.0, y),
            vec![format_depth(depth)],
            definition.clone(),
        )
        .with_class("boundary-label");
        output.add_to_layer(RenderLayer::Text, Primitive::Text(text));
    }

    // Both columns share one lane so their labels cannot collide
    let (min_y, max_y) = ctx.label_range();
    output.merge(render_lane(
        &lane_labels,
        construction.annulus().right(),
        construction.lane(),
        min_y,
        max_y,
    ));
    output
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        classify::Classifier,
        config::AppConfig,
        model::{DepthInterval, ProfileInput},
    };

    fn brunnen() -> ProfileInput {
        ProfileInput::new()
            .with_interval(ColumnRole::Geology, DepthInterval::new(0.0, 20.0, "Sand", ""))
            .with_interval(
                ColumnRole::Casing,
                DepthInterval::new(0.0, 12.0, "Vollrohr", "Vollrohr DN 150"),
            )
            .with_interval(
                ColumnRole::Casing,
                DepthInterval::new(12.0, 18.0, "Filterrohr", "Filter 1 mm"),
            )
            .with_interval(ColumnRole::Annulus, DepthInterval::new(0.0, 10.0, "Tonsperre", ""))
            .with_interval(ColumnRole::Annulus, DepthInterval::new(10.0, 18.004, "Filterkies", ""))
    }

    fn render(input: &ProfileInput) -> LayeredOutput {
        let config = AppConfig::default();
        let classifier = Classifier::default();
        let mut ctx = RenderContext::new(input, &config, &classifier);
        let construction = *ctx.layout().construction().unwrap();
        render_construction(
            &mut ctx,
            &construction,
            input.column(ColumnRole::Casing),
            input.column(ColumnRole::Annulus),
        )
    }

    #[test]
    fn test_casing_is_drawn_above_annulus() {
        let output = render(&brunnen());
        let casing: Vec<_> = output
            .iter()
            .filter(|(_, primitive)| primitive.has_class("casing"))
            .collect();
        let annulus: Vec<_> = output
            .iter()
            .filter(|(_, primitive)| primitive.has_class("annulus"))
            .collect();

        assert_eq!(casing.len(), 2);
        assert_eq!(annulus.len(), 2);
        assert!(casing.iter().all(|(layer, _)| *layer == RenderLayer::Casing));
        assert!(annulus.iter().all(|(layer, _)| *layer == RenderLayer::Column));
        assert!(casing.iter().all(|(layer, _)| *layer > RenderLayer::Column));
    }

    #[test]
    fn test_casing_is_centered_in_annulus() {
        let output = render(&brunnen());
        let bounds: Vec<_> = output
            .iter()
            .filter_map(|(_, primitive)| match primitive {
                Primitive::Rect(rect) => Some((primitive.has_class("casing"), rect.bounds())),
                _ => None,
            })
            .collect();
        let (_, casing) = bounds.iter().find(|(is_casing, _)| *is_casing).unwrap();
        let (_, annulus) = bounds.iter().find(|(is_casing, _)| !*is_casing).unwrap();
        assert_approx_eq!(f32, casing.center().x(), annulus.center().x());
        assert!(casing.width() < annulus.width());
    }

    #[test]
    fn test_construction_styles() {
        let output = render(&brunnen());
        let classes: Vec<&str> = output
            .iter()
            .filter_map(|(_, primitive)| match primitive {
                Primitive::Rect(_) => primitive.class(),
                _ => None,
            })
            .collect();
        assert!(classes.contains(&"interval annulus style-clay-seal"));
        assert!(classes.contains(&"interval annulus style-gravel-pack"));
        assert!(classes.contains(&"interval casing style-solid-pipe"));
        assert!(classes.contains(&"interval casing style-screen-pipe"));
    }

    #[test]
    fn test_boundaries_are_merged_at_centimeter_resolution() {
        let output = render(&brunnen());
        let labels: Vec<String> = output
            .iter()
            .filter(|(_, primitive)| primitive.has_class("boundary-label"))
            .filter_map(|(_, primitive)| match primitive {
                Primitive::Text(text) => Some(text.content()),
                _ => None,
            })
            .collect();
        // Geology is the shallowest column, so no start label here
        assert_eq!(labels, vec!["10.00 m", "12.00 m", "18.00 m"]);
    }

    #[test]
    fn test_labels_share_one_lane() {
        let output = render(&brunnen());
        let label_x: Vec<f32> = output
            .iter()
            .filter(|(_, primitive)| primitive.has_class("label"))
            .filter_map(|(_, primitive)| match primitive {
                Primitive::Text(text) => Some(text.position().x()),
                _ => None,
            })
            .collect();
        assert_eq!(label_x.len(), 4);
        assert!(label_x.iter().all(|x| *x == label_x[0]));
    }

    #[test]
    fn test_start_label_when_construction_is_shallowest() {
        let input = ProfileInput::new()
            .with_interval(ColumnRole::Casing, DepthInterval::new(0.5, 6.0, "Vollrohr", ""));
        let output = render(&input);
        let count = output
            .iter()
            .filter(|(_, primitive)| primitive.has_class("boundary-label"))
            .count();
        assert_eq!(count, 2);
    }
}
