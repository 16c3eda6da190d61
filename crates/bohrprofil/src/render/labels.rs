//! Vertical placement of interval labels in a label lane.
//!
//! Labels start on their anchor (the interval center). A downward pass keeps a
//! minimum gap between neighbours, then an upward pass pulls labels back above
//! the bottom limit. When a lane is too crowded for both limits, the top limit
//! wins and the last labels overflow at the bottom.

use bohrprofil_core::{
    color::Color,
    draw::{
        LayeredOutput, PathPrimitive, Primitive, RenderLayer, StrokeDefinition, Text,
        TextDefinition, TextPrimitive,
    },
    geometry::Point,
};

use crate::layout::Band;

/// Vertical gap between two neighbouring labels.
pub const LABEL_GAP: f32 = 4.0;

const LABEL_FONT_SIZE: u16 = 12;
const LEADER_COLOR: &str = "#666";

/// One label to place: where it wants to be and how tall it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelRequest {
    anchor_y: f32,
    height: f32,
}

impl LabelRequest {
    pub fn new(anchor_y: f32, height: f32) -> Self {
        Self { anchor_y, height }
    }

    pub fn anchor_y(&self) -> f32 {
        self.anchor_y
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

/// Places labels between `min_y` and `max_y` without overlap.
///
/// Returns the vertical center of every label, in the order of `requests`.
///
/// ```
/// # use bohrprofil::render::{LabelRequest, place_labels};
/// let requests = [LabelRequest::new(100.0, 14.0), LabelRequest::new(104.0, 14.0)];
/// let centers = place_labels(&requests, 0.0, 500.0, 4.0);
/// assert_eq!(centers, vec![100.0, 118.0]);
/// ```
pub fn place_labels(requests: &[LabelRequest], min_y: f32, max_y: f32, gap: f32) -> Vec<f32> {
    let mut order: Vec<usize> = (0..requests.len()).collect();
    order.sort_by(|&a, &b| requests[a].anchor_y.total_cmp(&requests[b].anchor_y));

    let mut tops = vec![0.0f32; requests.len()];

    let mut floor = min_y;
    for &idx in &order {
        let request = requests[idx];
        let top = (request.anchor_y - request.height / 2.0).max(floor);
        tops[idx] = top;
        floor = top + request.height + gap;
    }

    let mut limit = max_y;
    for &idx in order.iter().rev() {
        let request = requests[idx];
        if tops[idx] + request.height > limit {
            tops[idx] = (limit - request.height).max(min_y);
        }
        limit = tops[idx] - gap;
    }

    requests
        .iter()
        .zip(tops)
        .map(|(request, top)| top + request.height / 2.0)
        .collect()
}

/// A label waiting for placement in a lane.
#[derive(Debug, Clone)]
pub(super) struct LaneLabel {
    pub anchor_y: f32,
    pub text: String,
}

/// Draws `labels` into `lane` with leaders starting at `from_x`.
///
/// Each leader runs horizontally from the column edge to the middle of the
/// gutter and then bends to the placed label.
pub(super) fn render_lane(
    labels: &[LaneLabel],
    from_x: f32,
    lane: Band,
    min_y: f32,
    max_y: f32,
) -> LayeredOutput {
    let mut output = LayeredOutput::new();
    let definition = TextDefinition::new(LABEL_FONT_SIZE).with_vertical_centering(true);
    let leader_stroke = StrokeDefinition::solid(
        Color::new(LEADER_COLOR).unwrap_or_default(),
        1.0,
    );

    let wrapped: Vec<(f32, Vec<String>)> = labels
        .iter()
        .filter(|label| !label.text.trim().is_empty())
        .map(|label| {
            let lines = Text::new(&definition, label.text.trim()).wrap(lane.width() - 8.0);
            (label.anchor_y, lines)
        })
        .collect();
    let requests: Vec<LabelRequest> = wrapped
        .iter()
        .map(|(anchor_y, lines)| {
            LabelRequest::new(*anchor_y, lines.len() as f32 * definition.line_height())
        })
        .collect();
    let centers = place_labels(&requests, min_y, max_y, LABEL_GAP);

    let knee_x = from_x + (lane.left() - from_x) / 2.0;
    for ((anchor_y, lines), center_y) in wrapped.into_iter().zip(centers) {
        let leader = PathPrimitive::polyline(&[
            Point::new(from_x, anchor_y),
            Point::new(knee_x, anchor_y),
            Point::new(lane.left(), center_y),
        ])
        .with_stroke(Some(leader_stroke.clone()))
        .with_class("leader");
        output.add_to_layer(RenderLayer::Leader, Primitive::Path(leader));

        let text = TextPrimitive::new(
            Point::new(lane.left() + 4.0, center_y),
            lines,
            definition.clone(),
        )
        .with_class("label");
        output.add_to_layer(RenderLayer::Text, Primitive::Text(text));
    }

    output
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn placed_labels_do_not_overlap(
            anchors in prop::collection::vec((0.0f32..2000.0, 5.0f32..40.0), 0..30),
        ) {
            let requests: Vec<LabelRequest> = anchors
                .iter()
                .map(|(anchor, height)| LabelRequest::new(*anchor, *height))
                .collect();
            let centers = place_labels(&requests, 0.0, 100_000.0, LABEL_GAP);

            let mut placed: Vec<(f32, f32)> = requests
                .iter()
                .zip(&centers)
                .map(|(request, center)| (center - request.height() / 2.0, request.height()))
                .collect();
            placed.sort_by(|a, b| a.0.total_cmp(&b.0));
            for pair in placed.windows(2) {
                prop_assert!(pair[0].0 + pair[0].1 + LABEL_GAP <= pair[1].0 + 0.01);
            }
        }

        #[test]
        fn placed_labels_respect_top_limit(
            anchors in prop::collection::vec((0.0f32..500.0, 5.0f32..40.0), 0..20),
            min_y in 0.0f32..200.0,
        ) {
            let requests: Vec<LabelRequest> = anchors
                .iter()
                .map(|(anchor, height)| LabelRequest::new(*anchor, *height))
                .collect();
            let centers = place_labels(&requests, min_y, 600.0, LABEL_GAP);
            for (request, center) in requests.iter().zip(centers) {
                prop_assert!(center - request.height() / 2.0 >= min_y - 0.01);
            }
        }
    }
}
