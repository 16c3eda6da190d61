//! Configuration types for profile rendering.
//!
//! All types implement [`serde::Deserialize`] so a configuration can be loaded
//! from TOML. Every field has a default; an empty document is a valid
//! configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`LayoutConfig`] - Depth scale, margins and column widths.
//! - [`StyleConfig`] - Font family and background color.
//! - [`HeaderConfig`] - Title block contents.
//! - [`MarkerConfig`] - Marker captions.
//! - [`ClassificationConfig`] - Additional classification rules.
//!
//! # Example
//!
//! ```
//! # use bohrprofil::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [layout]
//!     pixels_per_meter = 20.0
//!     "#,
//! ).unwrap();
//! assert_eq!(config.layout().pixels_per_meter(), 20.0);
//! assert_eq!(config.layout().top_margin(), 180.0);
//! ```

use serde::Deserialize;

use bohrprofil_core::color::Color;

use crate::{
    classify::Rule,
    model::{ColumnRole, MarkerRole},
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    header: HeaderConfig,

    #[serde(default)]
    markers: MarkerConfig,

    #[serde(default)]
    classification: ClassificationConfig,
}

impl AppConfig {
    /// Creates a configuration with the given layout and style and default
    /// values for everything else.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self {
            layout,
            style,
            ..Self::default()
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn header(&self) -> &HeaderConfig {
        &self.header
    }

    pub fn markers(&self) -> &MarkerConfig {
        &self.markers
    }

    pub fn classification(&self) -> &ClassificationConfig {
        &self.classification
    }
}

/// Geometry of the drawing, in pixels unless noted otherwise.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pixels_per_meter: f32,
    top_margin: f32,
    bottom_margin: f32,
    left_margin: f32,
    /// Fixed canvas width; computed from the columns when unset.
    canvas_width: Option<f32>,
    geology_width: f32,
    annulus_width: f32,
    casing_width: f32,
    depth_gutter: f32,
    label_lane_width: f32,
    /// Meters between two axis ticks.
    tick_interval: f32,
    /// Smallest depth the canvas covers, in meters.
    min_depth: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pixels_per_meter: 40.0,
            top_margin: 180.0,
            bottom_margin: 100.0,
            left_margin: 80.0,
            canvas_width: None,
            geology_width: 120.0,
            annulus_width: 60.0,
            casing_width: 28.0,
            depth_gutter: 56.0,
            label_lane_width: 200.0,
            tick_interval: 1.0,
            min_depth: 10.0,
        }
    }
}

impl LayoutConfig {
    pub fn with_pixels_per_meter(mut self, value: f32) -> Self {
        self.pixels_per_meter = value;
        self
    }

    pub fn with_top_margin(mut self, value: f32) -> Self {
        self.top_margin = value;
        self
    }

    pub fn with_bottom_margin(mut self, value: f32) -> Self {
        self.bottom_margin = value;
        self
    }

    pub fn with_canvas_width(mut self, value: f32) -> Self {
        self.canvas_width = Some(value);
        self
    }

    pub fn with_tick_interval(mut self, value: f32) -> Self {
        self.tick_interval = value;
        self
    }

    pub fn with_min_depth(mut self, value: f32) -> Self {
        self.min_depth = value;
        self
    }

    pub fn pixels_per_meter(&self) -> f32 {
        self.pixels_per_meter
    }

    pub fn top_margin(&self) -> f32 {
        self.top_margin
    }

    pub fn bottom_margin(&self) -> f32 {
        self.bottom_margin
    }

    pub fn left_margin(&self) -> f32 {
        self.left_margin
    }

    pub fn canvas_width(&self) -> Option<f32> {
        self.canvas_width
    }

    pub fn geology_width(&self) -> f32 {
        self.geology_width
    }

    pub fn annulus_width(&self) -> f32 {
        self.annulus_width
    }

    pub fn casing_width(&self) -> f32 {
        self.casing_width
    }

    pub fn depth_gutter(&self) -> f32 {
        self.depth_gutter
    }

    pub fn label_lane_width(&self) -> f32 {
        self.label_lane_width
    }

    pub fn tick_interval(&self) -> f32 {
        self.tick_interval
    }

    pub fn min_depth(&self) -> f32 {
        self.min_depth
    }

    /// Checks that every value can produce geometry.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("pixels_per_meter", self.pixels_per_meter),
            ("geology_width", self.geology_width),
            ("annulus_width", self.annulus_width),
            ("casing_width", self.casing_width),
            ("label_lane_width", self.label_lane_width),
            ("tick_interval", self.tick_interval),
        ];
        let non_negative = [
            ("top_margin", self.top_margin),
            ("bottom_margin", self.bottom_margin),
            ("left_margin", self.left_margin),
            ("depth_gutter", self.depth_gutter),
            ("min_depth", self.min_depth),
        ];

        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("`{name}` must be a positive number, got {value}"));
            }
        }
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("`{name}` must not be negative, got {value}"));
            }
        }
        if let Some(width) = self.canvas_width {
            if !width.is_finite() || width <= 0.0 {
                return Err(format!("`canvas_width` must be a positive number, got {width}"));
            }
        }
        if self.casing_width > self.annulus_width {
            return Err(format!(
                "`casing_width` ({}) must not exceed `annulus_width` ({})",
                self.casing_width, self.annulus_width
            ));
        }
        Ok(())
    }
}

/// Visual styling options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    font_family: String,
    background_color: Option<String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: "Arial, sans-serif".to_string(),
            background_color: None,
        }
    }
}

impl StyleConfig {
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

/// One row of the title block table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HeaderField {
    key: String,
    caption: String,
}

impl HeaderField {
    pub fn new(key: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            caption: caption.into(),
        }
    }

    /// Metadata key the value is read from.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }
}

/// Title block configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    enabled: bool,
    title: String,
    fields: Vec<HeaderField>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Bohrprofil".to_string(),
            fields: vec![
                HeaderField::new("project", "Projekt"),
                HeaderField::new("execution", "Durchführung"),
                HeaderField::new("type", "Brunnentyp"),
                HeaderField::new("date", "Datum"),
            ],
        }
    }
}

impl HeaderConfig {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn fields(&self) -> &[HeaderField] {
        &self.fields
    }
}

/// Captions printed next to the marker symbols.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    static_water: String,
    drawdown_water: String,
    pump_intake: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            static_water: "RWS".to_string(),
            drawdown_water: "BWS".to_string(),
            pump_intake: "Pumpe".to_string(),
        }
    }
}

impl MarkerConfig {
    pub fn caption(&self, role: MarkerRole) -> &str {
        match role {
            MarkerRole::StaticWater => &self.static_water,
            MarkerRole::DrawdownWater => &self.drawdown_water,
            MarkerRole::PumpIntake => &self.pump_intake,
        }
    }
}

/// Additional classification rules per column role.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Use only the configured rules instead of prepending them to the
    /// built-in tables.
    replace_defaults: bool,
    geology: Vec<Rule>,
    casing: Vec<Rule>,
    annulus: Vec<Rule>,
}

impl ClassificationConfig {
    pub fn replace_defaults(&self) -> bool {
        self.replace_defaults
    }

    pub fn rules(&self, role: ColumnRole) -> &[Rule] {
        match role {
            ColumnRole::Geology => &self.geology,
            ColumnRole::Casing => &self.casing,
            ColumnRole::Annulus => &self.annulus,
        }
    }
}
