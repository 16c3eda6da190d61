//! Vertical depth axis with ticks and depth labels.

use bohrprofil_core::{
    draw::{
        LayeredOutput, LinePrimitive, Primitive, RenderLayer, TextAnchor, TextDefinition,
        TextPrimitive,
    },
    geometry::Point,
};

use super::RenderContext;

const TICK_LENGTH: f32 = 10.0;
const TICK_LABEL_OFFSET: f32 = 15.0;
const TICK_FONT_SIZE: u16 = 10;

/// Tolerance that keeps a tick exactly at the deepest depth.
const TICK_EPSILON: f32 = 1e-4;

/// Upper bound for the number of tick steps on one axis.
const MAX_TICK_STEPS: f32 = 500.0;

/// Depths of all ticks from the datum down to `max_depth`.
///
/// The step is widened to a multiple of `interval` when the axis would
/// otherwise get more than [`MAX_TICK_STEPS`] steps.
fn tick_depths(max_depth: f32, interval: f32) -> Vec<f32> {
    let steps = max_depth / interval;
    let step = if steps > MAX_TICK_STEPS {
        interval * (steps / MAX_TICK_STEPS).ceil()
    } else {
        interval
    };
    if !step.is_finite() {
        return vec![0.0];
    }
    let count = (max_depth / step + TICK_EPSILON).floor() as usize;
    (0..=count).map(|k| k as f32 * step).collect()
}

pub(super) fn render_axis(ctx: &RenderContext<'_>) -> LayeredOutput {
    let layout = ctx.layout();
    let scale = layout.scale();
    let x = layout.axis_x();
    let mut output = LayeredOutput::new();

    let axis = LinePrimitive::new(
        Point::new(x, scale.depth_to_y(0.0)),
        Point::new(x, scale.depth_to_y(scale.max_depth())),
    )
    .with_class("axis");
    output.add_to_layer(RenderLayer::Axis, Primitive::Line(axis));

    let definition = TextDefinition::new(TICK_FONT_SIZE)
        .with_anchor(TextAnchor::End)
        .with_vertical_centering(true);

    for depth in tick_depths(scale.max_depth(), ctx.config().layout().tick_interval()) {
        let y = scale.depth_to_y(depth);
        let tick = LinePrimitive::new(Point::new(x - TICK_LENGTH, y), Point::new(x, y))
            .with_class("tick");
        output.add_to_layer(RenderLayer::Axis, Primitive::Line(tick));

        let label = TextPrimitive::new(
            Point::new(x - TICK_LABEL_OFFSET, y),
            vec![format!("-{depth:.2} m")],
            definition.clone(),
        )
        .with_class("tick-label");
        output.add_to_layer(RenderLayer::Text, Primitive::Text(label));
    }

    output
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_tick_depths_include_both_ends() {
        let depths = tick_depths(10.0, 1.0);
        assert_eq!(depths.len(), 11);
        assert_approx_eq!(f32, depths[0], 0.0);
        assert_approx_eq!(f32, depths[10], 10.0);
    }

    #[test]
    fn test_tick_depths_stop_above_partial_step() {
        let depths = tick_depths(14.5, 1.0);
        assert_eq!(depths.len(), 15);
        assert_approx_eq!(f32, *depths.last().unwrap(), 14.0);
    }

    #[test]
    fn test_tick_depths_fractional_interval() {
        let depths = tick_depths(3.0, 0.1);
        assert_eq!(depths.len(), 31);
        assert_approx_eq!(f32, depths[30], 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_tick_depths_widen_step_on_deep_axis() {
        let depths = tick_depths(12_000.0, 1.0);
        assert!(depths.len() <= MAX_TICK_STEPS as usize + 1);
        // 24 steps of 1 m collapse into one tick
        assert_approx_eq!(f32, depths[1], 24.0);
        assert_approx_eq!(f32, *depths.last().unwrap(), 12_000.0);

        let dense = tick_depths(10.0, 1e-4);
        assert!(dense.len() <= MAX_TICK_STEPS as usize + 1);
    }

    #[test]
    fn test_tick_depths_never_overflow() {
        assert_eq!(tick_depths(1.0e20, 1.0).len(), 501);
        assert_eq!(tick_depths(f32::MAX, 1e-30), vec![0.0]);
    }
}
