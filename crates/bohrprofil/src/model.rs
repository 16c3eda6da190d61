//! Profile data model.
//!
//! A profile is a set of depth-interval columns sharing one vertical depth
//! axis, a list of point markers and a free-form metadata record for the title
//! block. Depths are meters below the datum (ground level) and grow downward.

use std::{collections::BTreeMap, fmt, str::FromStr};

/// One contiguous vertical segment of a column.
///
/// The constructor does not validate the range; rows come straight from data
/// entry and are checked with [`DepthInterval::is_renderable`] when drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthInterval {
    start: f32,
    end: f32,
    category: String,
    label: String,
}

impl DepthInterval {
    pub fn new(start: f32, end: f32, category: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            category: category.into(),
            label: label.into(),
        }
    }

    /// Depth of the top of the interval in meters.
    pub fn start(&self) -> f32 {
        self.start
    }

    /// Depth of the bottom of the interval in meters.
    pub fn end(&self) -> f32 {
        self.end
    }

    /// Material or type tag used for classification.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Free-text annotation shown beside the interval.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns `true` if geometry can be computed for the interval: both
    /// depths finite, `start >= 0` and `end > start`.
    pub fn is_renderable(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.start >= 0.0 && self.end > self.start
    }
}

/// The role of a column in the drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnRole {
    /// Soil and rock stratigraphy
    Geology,
    /// Pipe sections (solid, screen, sump)
    Casing,
    /// Backfill around the casing
    Annulus,
}

impl ColumnRole {
    pub fn name(self) -> &'static str {
        match self {
            Self::Geology => "geology",
            Self::Casing => "casing",
            Self::Annulus => "annulus",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A break in the continuity of a column, between two consecutive intervals
/// sorted by start depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Discontinuity {
    /// Nothing is recorded between `from` and `to`
    Gap { from: f32, to: f32 },
    /// Two intervals both cover `from..to`
    Overlap { from: f32, to: f32 },
}

/// Depth difference below which two boundaries count as the same (1 mm).
const CONTINUITY_TOLERANCE: f32 = 0.001;

/// An ordered sequence of intervals with one role.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    role: ColumnRole,
    intervals: Vec<DepthInterval>,
}

impl Column {
    pub fn new(role: ColumnRole) -> Self {
        Self {
            role,
            intervals: Vec::new(),
        }
    }

    pub fn with_intervals(role: ColumnRole, intervals: Vec<DepthInterval>) -> Self {
        Self { role, intervals }
    }

    pub fn role(&self) -> ColumnRole {
        self.role
    }

    pub fn push(&mut self, interval: DepthInterval) {
        self.intervals.push(interval);
    }

    /// All intervals in input order, including unrenderable ones.
    pub fn intervals(&self) -> &[DepthInterval] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Renderable intervals, stably sorted by start depth.
    pub fn renderable(&self) -> Vec<&DepthInterval> {
        let mut intervals: Vec<&DepthInterval> = self
            .intervals
            .iter()
            .filter(|interval| interval.is_renderable())
            .collect();
        intervals.sort_by(|a, b| a.start.total_cmp(&b.start));
        intervals
    }

    /// Deepest end of all renderable intervals.
    pub fn max_end(&self) -> Option<f32> {
        self.renderable()
            .iter()
            .map(|interval| interval.end)
            .reduce(f32::max)
    }

    /// Shallowest start of all renderable intervals.
    pub fn min_start(&self) -> Option<f32> {
        self.renderable().first().map(|interval| interval.start)
    }

    /// Gaps and overlaps between consecutive renderable intervals.
    pub fn discontinuities(&self) -> Vec<Discontinuity> {
        let intervals = self.renderable();
        intervals
            .windows(2)
            .filter_map(|pair| {
                let (upper, lower) = (pair[0], pair[1]);
                if lower.start > upper.end + CONTINUITY_TOLERANCE {
                    Some(Discontinuity::Gap {
                        from: upper.end,
                        to: lower.start,
                    })
                } else if lower.start + CONTINUITY_TOLERANCE < upper.end {
                    Some(Discontinuity::Overlap {
                        from: lower.start,
                        to: upper.end.min(lower.end),
                    })
                } else {
                    None
                }
            })
            .collect()
    }
}

/// The meaning of a [`ReferenceMarker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkerRole {
    /// Static water level (Ruhewasserspiegel)
    StaticWater,
    /// Drawdown water level while pumping (Betriebswasserspiegel)
    DrawdownWater,
    /// Depth of the pump intake
    PumpIntake,
}

impl MarkerRole {
    pub fn name(self) -> &'static str {
        match self {
            Self::StaticWater => "static-water",
            Self::DrawdownWater => "drawdown-water",
            Self::PumpIntake => "pump-intake",
        }
    }
}

impl FromStr for MarkerRole {
    type Err = String;

    /// Accepts camelCase, snake_case and kebab-case names as well as the
    /// usual German abbreviations.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "staticwater" | "static" | "rws" | "ruhewasser" | "ruhewasserspiegel" => {
                Ok(Self::StaticWater)
            }
            "drawdownwater" | "drawdown" | "bws" | "betriebswasser" | "betriebswasserspiegel" => {
                Ok(Self::DrawdownWater)
            }
            "pumpintake" | "pump" | "pumpe" | "pumpeneinlauf" => Ok(Self::PumpIntake),
            _ => Err(format!("unknown marker role `{s}`")),
        }
    }
}

/// A point depth annotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceMarker {
    depth: f32,
    role: MarkerRole,
}

impl ReferenceMarker {
    pub fn new(depth: f32, role: MarkerRole) -> Self {
        Self { depth, role }
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn role(&self) -> MarkerRole {
        self.role
    }

    /// Returns `true` for a finite, non-negative depth.
    pub fn is_renderable(&self) -> bool {
        self.depth.is_finite() && self.depth >= 0.0
    }
}

/// Free-form key to text map for the title block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderMetadata {
    entries: BTreeMap<String, String>,
}

impl RenderMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Returns the value for `key`, or an empty string.
    pub fn get(&self, key: &str) -> &str {
        self.entries.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RenderMetadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Everything the renderer needs for one profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileInput {
    geology: Column,
    casing: Column,
    annulus: Column,
    markers: Vec<ReferenceMarker>,
    metadata: RenderMetadata,
}

impl Default for ProfileInput {
    fn default() -> Self {
        Self {
            geology: Column::new(ColumnRole::Geology),
            casing: Column::new(ColumnRole::Casing),
            annulus: Column::new(ColumnRole::Annulus),
            markers: Vec::new(),
            metadata: RenderMetadata::new(),
        }
    }
}

impl ProfileInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interval to the column with the given role.
    pub fn with_interval(mut self, role: ColumnRole, interval: DepthInterval) -> Self {
        self.column_mut(role).push(interval);
        self
    }

    pub fn with_marker(mut self, marker: ReferenceMarker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn with_metadata(mut self, metadata: RenderMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn column(&self, role: ColumnRole) -> &Column {
        match role {
            ColumnRole::Geology => &self.geology,
            ColumnRole::Casing => &self.casing,
            ColumnRole::Annulus => &self.annulus,
        }
    }

    pub fn column_mut(&mut self, role: ColumnRole) -> &mut Column {
        match role {
            ColumnRole::Geology => &mut self.geology,
            ColumnRole::Casing => &mut self.casing,
            ColumnRole::Annulus => &mut self.annulus,
        }
    }

    /// The three columns in drawing order.
    pub fn columns(&self) -> [&Column; 3] {
        [&self.geology, &self.casing, &self.annulus]
    }

    pub fn markers(&self) -> &[ReferenceMarker] {
        &self.markers
    }

    pub fn push_marker(&mut self, marker: ReferenceMarker) {
        self.markers.push(marker);
    }

    pub fn metadata(&self) -> &RenderMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut RenderMetadata {
        &mut self.metadata
    }

    /// Returns `true` if a casing or annulus record can be drawn.
    pub fn has_construction(&self) -> bool {
        self.casing.max_end().is_some() || self.annulus.max_end().is_some()
    }
}
