//! Turns a [`ProfileInput`] into a [`VectorDrawing`].
//!
//! Every emitter returns a [`LayeredOutput`]. The outputs are merged into one
//! [`DrawingBuilder`], which orders them by layer, so emitters can run in any
//! order without affecting the z-order of the result.

mod axis;
mod column;
mod construction;
mod header;
mod labels;
mod markers;

use std::collections::BTreeSet;

use log::{debug, info, warn};

use bohrprofil_core::{
    draw::{DrawingBuilder, LayeredOutput, VectorDrawing},
    geometry::Size,
};

pub use labels::{LABEL_GAP, LabelRequest, place_labels};

use crate::{
    classify::Classifier,
    config::AppConfig,
    error::ProfileError,
    layout::{MAX_CANVAS_HEIGHT, ProfileLayout},
    model::{ColumnRole, DepthInterval, Discontinuity, ProfileInput},
    style::Style,
};

/// Space kept free below the last label.
const LABEL_BOTTOM_PADDING: f32 = 10.0;

/// Shared state of one render pass.
pub(crate) struct RenderContext<'a> {
    layout: ProfileLayout,
    config: &'a AppConfig,
    classifier: &'a Classifier,
    /// Column whose first interval also gets its start depth labelled
    shallowest: Option<ColumnRole>,
    styles: BTreeSet<Style>,
}

impl<'a> RenderContext<'a> {
    fn new(input: &ProfileInput, config: &'a AppConfig, classifier: &'a Classifier) -> Self {
        let shallowest = input
            .columns()
            .iter()
            .filter_map(|column| column.min_start().map(|start| (column.role(), start)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(role, _)| role);

        Self {
            layout: ProfileLayout::new(config.layout(), input),
            config,
            classifier,
            shallowest,
            styles: BTreeSet::new(),
        }
    }

    pub(crate) fn layout(&self) -> &ProfileLayout {
        &self.layout
    }

    pub(crate) fn config(&self) -> &AppConfig {
        self.config
    }

    /// Classifies `interval` and remembers the style so its pattern is
    /// emitted once.
    pub(crate) fn classify(&mut self, role: ColumnRole, interval: &DepthInterval) -> Style {
        let style = self
            .classifier
            .classify(role, interval.category(), &[interval.label()]);
        self.styles.insert(style);
        style
    }

    pub(crate) fn labels_start_at(&self, role: ColumnRole) -> bool {
        self.shallowest == Some(role)
    }

    /// Vertical range available to label lanes.
    pub(crate) fn label_range(&self) -> (f32, f32) {
        (
            self.layout.scale().top_margin(),
            self.layout.canvas_height() - LABEL_BOTTOM_PADDING,
        )
    }
}

/// Text shown next to an interval: the label, or the category when the label
/// is empty.
pub(crate) fn display_text(interval: &DepthInterval) -> &str {
    if interval.label().trim().is_empty() {
        interval.category()
    } else {
        interval.label()
    }
}

/// Boundary depth as printed next to a column.
pub(crate) fn format_depth(depth: f32) -> String {
    format!("{depth:.2} m")
}

fn report_discontinuities(input: &ProfileInput) {
    for column in input.columns() {
        let skipped = column.intervals().len() - column.renderable().len();
        if skipped > 0 {
            warn!(column = column.role().name(), skipped; "Skipping invalid intervals");
        }
        for discontinuity in column.discontinuities() {
            match discontinuity {
                Discontinuity::Gap { from, to } => {
                    warn!(column = column.role().name(), from, to; "Gap between intervals")
                }
                Discontinuity::Overlap { from, to } => {
                    warn!(column = column.role().name(), from, to; "Overlapping intervals")
                }
            }
        }
    }
}

/// Renders `input` with `config`.
///
/// # Errors
///
/// Returns [`ProfileError::Layout`] for an unusable layout configuration or a
/// canvas taller than [`MAX_CANVAS_HEIGHT`], and [`ProfileError::Config`] for
/// an unreadable background color. Problems in the data itself are logged and
/// never fail the render.
pub(crate) fn render_profile(
    input: &ProfileInput,
    config: &AppConfig,
    classifier: &Classifier,
) -> Result<VectorDrawing, ProfileError> {
    config.layout().validate().map_err(ProfileError::Layout)?;
    let background = config.style().background_color().map_err(ProfileError::Config)?;

    report_discontinuities(input);

    let mut ctx = RenderContext::new(input, config, classifier);
    let layout = ctx.layout().clone();
    let canvas_height = layout.canvas_height();
    if !canvas_height.is_finite() || canvas_height > MAX_CANVAS_HEIGHT {
        return Err(ProfileError::Layout(format!(
            "canvas height {canvas_height} px for a depth of {} m exceeds the limit of {MAX_CANVAS_HEIGHT} px",
            layout.scale().max_depth(),
        )));
    }
    info!(
        width = layout.canvas_width(),
        height = layout.canvas_height(),
        max_depth = layout.scale().max_depth(),
        construction = layout.construction().is_some();
        "Rendering profile",
    );

    let mut output = LayeredOutput::new();
    output.merge(header::render_header(&ctx, input.metadata()));
    output.merge(axis::render_axis(&ctx));
    output.merge(column::render_geology(&mut ctx, input.column(ColumnRole::Geology)));
    if let Some(construction) = layout.construction() {
        output.merge(construction::render_construction(
            &mut ctx,
            construction,
            input.column(ColumnRole::Casing),
            input.column(ColumnRole::Annulus),
        ));
    }
    output.merge(markers::render_markers(&ctx, input.markers()));

    let mut builder = DrawingBuilder::new(Size::new(layout.canvas_width(), layout.canvas_height()))
        .with_font_family(config.style().font_family());
    if let Some(color) = background {
        builder = builder.with_background(color);
    }
    for style in &ctx.styles {
        builder.add_pattern(style.pattern_definition());
    }
    debug!(styles = ctx.styles.len(); "Registered fill patterns");
    builder.merge(output);

    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::LayoutConfig,
        model::{MarkerRole, ReferenceMarker},
    };

    fn render(input: &ProfileInput) -> VectorDrawing {
        render_profile(input, &AppConfig::default(), &Classifier::default()).unwrap()
    }

    #[test]
    fn test_invalid_layout_is_rejected() {
        let config = AppConfig::new(
            LayoutConfig::default().with_pixels_per_meter(0.0),
            Default::default(),
        );
        let result = render_profile(&ProfileInput::new(), &config, &Classifier::default());
        assert!(matches!(result, Err(ProfileError::Layout(_))));
    }

    #[test]
    fn test_shallowest_column_prefers_geology_on_tie() {
        let input = ProfileInput::new()
            .with_interval(ColumnRole::Casing, DepthInterval::new(0.0, 5.0, "Vollrohr", ""))
            .with_interval(ColumnRole::Geology, DepthInterval::new(0.0, 5.0, "Sand", ""));
        let config = AppConfig::default();
        let classifier = Classifier::default();
        let ctx = RenderContext::new(&input, &config, &classifier);
        assert!(ctx.labels_start_at(ColumnRole::Geology));
        assert!(!ctx.labels_start_at(ColumnRole::Casing));
    }

    #[test]
    fn test_shallowest_column_ignores_invalid_intervals() {
        let input = ProfileInput::new()
            .with_interval(ColumnRole::Geology, DepthInterval::new(-1.0, 5.0, "Sand", ""))
            .with_interval(ColumnRole::Geology, DepthInterval::new(2.0, 5.0, "Sand", ""))
            .with_interval(ColumnRole::Annulus, DepthInterval::new(1.0, 5.0, "Kies", ""));
        let config = AppConfig::default();
        let classifier = Classifier::default();
        let ctx = RenderContext::new(&input, &config, &classifier);
        assert!(ctx.labels_start_at(ColumnRole::Annulus));
    }

    #[test]
    fn test_only_used_patterns_are_emitted() {
        let input = ProfileInput::new()
            .with_interval(ColumnRole::Geology, DepthInterval::new(0.0, 1.0, "Ton", ""))
            .with_interval(ColumnRole::Geology, DepthInterval::new(1.0, 2.0, "Ton", ""));
        let drawing = render(&input);
        let ids: Vec<&str> = drawing.patterns().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["pat-clay"]);
    }

    #[test]
    fn test_display_text_falls_back_to_category() {
        let interval = DepthInterval::new(0.0, 1.0, "Vollrohr", " ");
        assert_eq!(display_text(&interval), "Vollrohr");
        let interval = DepthInterval::new(0.0, 1.0, "Vollrohr", "DN 150");
        assert_eq!(display_text(&interval), "DN 150");
    }

    #[test]
    fn test_format_depth() {
        assert_eq!(format_depth(3.5), "3.50 m");
        assert_eq!(format_depth(0.0), "0.00 m");
    }

    #[test]
    fn test_layers_are_grouped_in_order() {
        let input = ProfileInput::new()
            .with_interval(ColumnRole::Geology, DepthInterval::new(0.0, 2.0, "Sand", "Sand"))
            .with_interval(ColumnRole::Casing, DepthInterval::new(0.0, 2.0, "Vollrohr", ""))
            .with_marker(ReferenceMarker::new(1.0, MarkerRole::StaticWater));
        let drawing = render(&input);
        let layers: Vec<_> = drawing.primitives().iter().map(|(layer, _)| *layer).collect();
        let mut sorted = layers.clone();
        sorted.sort();
        assert_eq!(layers, sorted);
    }
}
