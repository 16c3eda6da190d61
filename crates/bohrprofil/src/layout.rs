//! Depth scale and horizontal placement of the columns.
//!
//! One [`DepthScale`] is computed per render and shared by the axis, every
//! column and the markers, so the same depth maps to the same y everywhere on
//! the canvas.
//!
//! Horizontally the drawing is laid out left to right:
//!
//! ```text
//! | axis | geology | gutter | geology labels | gutter | annulus/casing | gutter | construction labels |
//! ```
//!
//! The construction part only exists when the profile has casing or annulus
//! records.

use crate::{config::LayoutConfig, model::ProfileInput};

/// Canvas width used for a geology-only profile when none is configured.
const GEOLOGY_CANVAS_WIDTH: f32 = 600.0;

/// Space kept free right of the last label lane.
const RIGHT_MARGIN: f32 = 20.0;

/// Tallest canvas a render accepts, in pixels.
///
/// 25 km of depth at the default 40 px/m. Deeper inputs are rejected with
/// [`ProfileError::Layout`](crate::ProfileError::Layout) instead of producing
/// an unbounded number of ticks.
pub const MAX_CANVAS_HEIGHT: f32 = 1_000_000.0;

/// The linear depth to pixel transform.
///
/// ```
/// # use bohrprofil::layout::DepthScale;
/// let scale = DepthScale::new(40.0, 180.0, 10.0, 100.0);
/// assert_eq!(scale.depth_to_y(0.4), 196.0);
/// assert_eq!(scale.canvas_height(), 680.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthScale {
    pixels_per_meter: f32,
    top_margin: f32,
    max_depth: f32,
    bottom_margin: f32,
}

impl DepthScale {
    pub fn new(pixels_per_meter: f32, top_margin: f32, max_depth: f32, bottom_margin: f32) -> Self {
        Self {
            pixels_per_meter,
            top_margin,
            max_depth,
            bottom_margin,
        }
    }

    /// Builds the scale for `input`.
    ///
    /// The covered depth is the largest of `min_depth`, the deepest renderable
    /// interval end of any column and the deepest renderable marker.
    pub fn for_input(config: &LayoutConfig, input: &ProfileInput) -> Self {
        let interval_depth = input
            .columns()
            .iter()
            .filter_map(|column| column.max_end())
            .fold(0.0, f32::max);
        let marker_depth = input
            .markers()
            .iter()
            .filter(|marker| marker.is_renderable())
            .map(|marker| marker.depth())
            .fold(0.0, f32::max);
        let max_depth = config.min_depth().max(interval_depth).max(marker_depth);

        Self::new(
            config.pixels_per_meter(),
            config.top_margin(),
            max_depth,
            config.bottom_margin(),
        )
    }

    pub fn pixels_per_meter(&self) -> f32 {
        self.pixels_per_meter
    }

    pub fn top_margin(&self) -> f32 {
        self.top_margin
    }

    /// Deepest depth covered by the canvas, in meters.
    pub fn max_depth(&self) -> f32 {
        self.max_depth
    }

    pub fn depth_to_y(&self, depth: f32) -> f32 {
        self.top_margin + depth * self.pixels_per_meter
    }

    /// Pixel height of the depth range `from..to`.
    pub fn span(&self, from: f32, to: f32) -> f32 {
        (to - from) * self.pixels_per_meter
    }

    pub fn canvas_height(&self) -> f32 {
        self.depth_to_y(self.max_depth) + self.bottom_margin
    }
}

/// A vertical band of the drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    left: f32,
    width: f32,
}

impl Band {
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn center(&self) -> f32 {
        self.left + self.width / 2.0
    }
}

/// Horizontal position of the construction view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstructionLayout {
    annulus: Band,
    casing: Band,
    lane: Band,
}

impl ConstructionLayout {
    /// Full-width annulus band.
    pub fn annulus(&self) -> Band {
        self.annulus
    }

    /// Narrower casing band on the same centerline.
    pub fn casing(&self) -> Band {
        self.casing
    }

    /// Label lane right of the band.
    pub fn lane(&self) -> Band {
        self.lane
    }

    pub fn center(&self) -> f32 {
        self.annulus.center()
    }
}

/// All positions needed by the emitters for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileLayout {
    scale: DepthScale,
    axis_x: f32,
    geology: Band,
    geology_lane: Band,
    construction: Option<ConstructionLayout>,
    depth_gutter: f32,
    canvas_width: f32,
}

impl ProfileLayout {
    pub fn new(config: &LayoutConfig, input: &ProfileInput) -> Self {
        let scale = DepthScale::for_input(config, input);
        let gutter = config.depth_gutter();

        let geology = Band::new(config.left_margin(), config.geology_width());
        let geology_lane = Band::new(geology.right() + gutter, config.label_lane_width());

        let construction = input.has_construction().then(|| {
            let annulus = Band::new(geology_lane.right() + gutter, config.annulus_width());
            let casing = Band::new(
                annulus.center() - config.casing_width() / 2.0,
                config.casing_width(),
            );
            let lane = Band::new(annulus.right() + gutter, config.label_lane_width());
            ConstructionLayout {
                annulus,
                casing,
                lane,
            }
        });

        let content_right = construction
            .map(|c| c.lane.right())
            .unwrap_or(geology_lane.right());
        let canvas_width = config
            .canvas_width()
            .unwrap_or_else(|| GEOLOGY_CANVAS_WIDTH.max(content_right + RIGHT_MARGIN));

        Self {
            scale,
            axis_x: config.left_margin(),
            geology,
            geology_lane,
            construction,
            depth_gutter: gutter,
            canvas_width,
        }
    }

    pub fn scale(&self) -> &DepthScale {
        &self.scale
    }

    /// x of the vertical depth axis.
    pub fn axis_x(&self) -> f32 {
        self.axis_x
    }

    pub fn geology(&self) -> Band {
        self.geology
    }

    pub fn geology_lane(&self) -> Band {
        self.geology_lane
    }

    pub fn construction(&self) -> Option<&ConstructionLayout> {
        self.construction.as_ref()
    }

    /// Width of the strip between a column and its label lane.
    pub fn depth_gutter(&self) -> f32 {
        self.depth_gutter
    }

    pub fn canvas_width(&self) -> f32 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f32 {
        self.scale.canvas_height()
    }

    /// x of the centerline markers are drawn on.
    pub fn marker_x(&self) -> f32 {
        self.construction
            .map(|c| c.center())
            .unwrap_or(self.geology.center())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::model::{ColumnRole, DepthInterval, MarkerRole, ReferenceMarker};

    #[test]
    fn test_empty_input_floors_to_min_depth() {
        let scale = DepthScale::for_input(&LayoutConfig::default(), &ProfileInput::new());
        assert_approx_eq!(f32, scale.max_depth(), 10.0);
        assert_approx_eq!(f32, scale.canvas_height(), 180.0 + 400.0 + 100.0);
    }

    #[test]
    fn test_max_depth_ignores_invalid_intervals() {
        let input = ProfileInput::new()
            .with_interval(ColumnRole::Geology, DepthInterval::new(0.0, 12.0, "Sand", ""))
            .with_interval(ColumnRole::Geology, DepthInterval::new(30.0, 20.0, "Kies", "bad"))
            .with_interval(ColumnRole::Casing, DepthInterval::new(0.0, 14.5, "Vollrohr", ""));
        let scale = DepthScale::for_input(&LayoutConfig::default(), &input);
        assert_approx_eq!(f32, scale.max_depth(), 14.5);
    }

    #[test]
    fn test_max_depth_includes_markers() {
        let input = ProfileInput::new()
            .with_interval(ColumnRole::Geology, DepthInterval::new(0.0, 12.0, "Sand", ""))
            .with_marker(ReferenceMarker::new(16.0, MarkerRole::PumpIntake))
            .with_marker(ReferenceMarker::new(f32::NAN, MarkerRole::StaticWater));
        let scale = DepthScale::for_input(&LayoutConfig::default(), &input);
        assert_approx_eq!(f32, scale.max_depth(), 16.0);
    }

    #[test]
    fn test_span() {
        let scale = DepthScale::new(40.0, 180.0, 10.0, 100.0);
        assert_approx_eq!(f32, scale.span(0.4, 3.5), 124.0, epsilon = 0.001);
        assert_approx_eq!(f32, scale.depth_to_y(3.5), 320.0);
    }

    #[test]
    fn test_geology_only_layout() {
        let layout = ProfileLayout::new(&LayoutConfig::default(), &ProfileInput::new());
        assert!(layout.construction().is_none());
        assert_approx_eq!(f32, layout.canvas_width(), 600.0);
        assert_approx_eq!(f32, layout.geology().left(), 80.0);
        assert_approx_eq!(f32, layout.geology().right(), 200.0);
        assert_approx_eq!(f32, layout.geology_lane().left(), 256.0);
        assert_approx_eq!(f32, layout.marker_x(), 140.0);
    }

    #[test]
    fn test_construction_layout() {
        let input = ProfileInput::new()
            .with_interval(ColumnRole::Casing, DepthInterval::new(0.0, 10.0, "Vollrohr", ""));
        let layout = ProfileLayout::new(&LayoutConfig::default(), &input);
        let construction = layout.construction().unwrap();

        assert_approx_eq!(f32, construction.annulus().left(), 512.0);
        assert_approx_eq!(f32, construction.center(), 542.0);
        assert_approx_eq!(f32, construction.casing().center(), 542.0);
        assert_approx_eq!(f32, construction.casing().width(), 28.0);
        assert_approx_eq!(f32, construction.lane().left(), 628.0);
        assert_approx_eq!(f32, layout.canvas_width(), 848.0);
        assert_approx_eq!(f32, layout.marker_x(), 542.0);
    }

    #[test]
    fn test_inverted_casing_row_reserves_no_band() {
        let input = ProfileInput::new()
            .with_interval(ColumnRole::Casing, DepthInterval::new(6.0, 2.0, "Vollrohr", ""));
        let layout = ProfileLayout::new(&LayoutConfig::default(), &input);
        assert!(layout.construction().is_none());
        assert_approx_eq!(f32, layout.canvas_width(), 600.0);
    }

    #[test]
    fn test_configured_canvas_width_wins() {
        let config = LayoutConfig::default().with_canvas_width(1000.0);
        let layout = ProfileLayout::new(&config, &ProfileInput::new());
        assert_approx_eq!(f32, layout.canvas_width(), 1000.0);
    }
}
