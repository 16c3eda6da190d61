//! Visual styles for classified intervals.
//!
//! [`Style`] is the closed set of fills the classifier can select. Each style
//! owns one pattern tile; intervals reference it with `fill="url(#pat-<id>)"`.

use serde::Deserialize;

use bohrprofil_core::{
    color::Color,
    draw::{Fill, PatternDefinition, PatternMark},
};

/// Fill style of one interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    // Geology
    Topsoil,
    Fill,
    Peat,
    Rock,
    Clay,
    Silt,
    SandGravel,
    Gravel,
    Sand,
    // Casing
    SolidPipe,
    ScreenPipe,
    SumpPipe,
    // Annulus
    GravelPack,
    ClaySeal,
    Cement,
    Cuttings,
    /// No rule matched
    Unclassified,
}

impl Style {
    /// Every style, in declaration order.
    pub const ALL: [Style; 17] = [
        Self::Topsoil,
        Self::Fill,
        Self::Peat,
        Self::Rock,
        Self::Clay,
        Self::Silt,
        Self::SandGravel,
        Self::Gravel,
        Self::Sand,
        Self::SolidPipe,
        Self::ScreenPipe,
        Self::SumpPipe,
        Self::GravelPack,
        Self::ClaySeal,
        Self::Cement,
        Self::Cuttings,
        Self::Unclassified,
    ];

    /// Stable identifier, also used in CSS classes and configuration files.
    pub fn id(self) -> &'static str {
        match self {
            Self::Topsoil => "topsoil",
            Self::Fill => "fill",
            Self::Peat => "peat",
            Self::Rock => "rock",
            Self::Clay => "clay",
            Self::Silt => "silt",
            Self::SandGravel => "sand-gravel",
            Self::Gravel => "gravel",
            Self::Sand => "sand",
            Self::SolidPipe => "solid-pipe",
            Self::ScreenPipe => "screen-pipe",
            Self::SumpPipe => "sump-pipe",
            Self::GravelPack => "gravel-pack",
            Self::ClaySeal => "clay-seal",
            Self::Cement => "cement",
            Self::Cuttings => "cuttings",
            Self::Unclassified => "unclassified",
        }
    }

    pub fn pattern_id(self) -> String {
        format!("pat-{}", self.id())
    }

    /// The fill that references this style's pattern.
    pub fn fill(self) -> Fill {
        Fill::pattern(self.pattern_id())
    }

    /// Builds the pattern tile for this style.
    pub fn pattern_definition(self) -> PatternDefinition {
        let tile = PatternDefinition::new(self.pattern_id(), 10.0);
        match self {
            Self::Topsoil => tile
                .with_background(css("#5c4033"))
                .with_mark(PatternMark::segment((1.0, 3.0), (4.0, 3.0), css("#3b2a20"), 1.0))
                .with_mark(PatternMark::segment((6.0, 8.0), (9.0, 8.0), css("#3b2a20"), 1.0)),
            Self::Fill => tile
                .with_background(css("#bdb76b").with_alpha(0.3))
                .with_mark(PatternMark::segment((1.0, 1.0), (4.0, 4.0), css("#555"), 1.0))
                .with_mark(PatternMark::dot(7.0, 7.0, 1.2, css("#555"))),
            Self::Peat => tile
                .with_background(css("#6b4423").with_alpha(0.5))
                .with_mark(PatternMark::segment((0.0, 3.0), (6.0, 3.0), css("#2f1b0c"), 1.0))
                .with_mark(PatternMark::segment((4.0, 8.0), (10.0, 8.0), css("#2f1b0c"), 1.0)),
            Self::Rock => PatternDefinition::new(self.pattern_id(), 20.0)
                .with_background(css("#808080").with_alpha(0.3))
                .with_mark(PatternMark::segment((0.0, 0.0), (20.0, 20.0), css("#333"), 1.0))
                .with_mark(PatternMark::segment((20.0, 0.0), (0.0, 20.0), css("#333"), 1.0)),
            Self::Clay => tile
                .with_background(css("#d2b48c").with_alpha(0.3))
                .with_mark(PatternMark::segment((-1.0, 1.0), (1.0, -1.0), css("#8b4513"), 1.0))
                .with_mark(PatternMark::segment((0.0, 10.0), (10.0, 0.0), css("#8b4513"), 1.0))
                .with_mark(PatternMark::segment((9.0, 11.0), (11.0, 9.0), css("#8b4513"), 1.0)),
            Self::Silt => tile
                .with_background(css("#c8b88a").with_alpha(0.3))
                .with_mark(PatternMark::segment((0.0, 5.0), (4.0, 5.0), css("#8b7355"), 0.8))
                .with_mark(PatternMark::segment((6.0, 5.0), (10.0, 5.0), css("#8b7355"), 0.8)),
            Self::SandGravel => tile
                .with_background(css("#ffd700").with_alpha(0.3))
                .with_mark(PatternMark::dot(2.0, 2.0, 1.0, css("#d4a017")))
                .with_mark(PatternMark::dot(7.0, 7.0, 1.0, css("#d4a017"))),
            Self::Gravel => tile
                .with_background(css("#fffacd"))
                .with_mark(PatternMark::dot(3.0, 3.0, 1.5, css("orange")))
                .with_mark(PatternMark::dot(8.0, 8.0, 1.5, css("orange"))),
            Self::Sand => tile
                .with_background(css("#f4e19c").with_alpha(0.5))
                .with_mark(PatternMark::dot(2.0, 3.0, 0.6, css("#b8860b")))
                .with_mark(PatternMark::dot(6.0, 7.0, 0.6, css("#b8860b")))
                .with_mark(PatternMark::dot(8.0, 2.0, 0.6, css("#b8860b"))),
            Self::SolidPipe => tile.with_background(css("white")),
            Self::ScreenPipe => tile
                .with_background(css("white"))
                .with_mark(PatternMark::segment((2.0, 3.0), (8.0, 3.0), css("black"), 1.2))
                .with_mark(PatternMark::segment((2.0, 8.0), (8.0, 8.0), css("black"), 1.2)),
            Self::SumpPipe => tile.with_background(css("#a0a0a0")),
            Self::GravelPack => tile
                .with_background(css("#fff3c4"))
                .with_mark(PatternMark::dot(2.5, 2.5, 1.0, css("#daa520")))
                .with_mark(PatternMark::dot(7.5, 7.5, 1.0, css("#daa520")))
                .with_mark(PatternMark::dot(7.5, 2.5, 0.6, css("#daa520"))),
            Self::ClaySeal => tile
                .with_background(css("#8fbc8f").with_alpha(0.6))
                .with_mark(PatternMark::segment((0.0, 10.0), (10.0, 0.0), css("#2e5e2e"), 1.0))
                .with_mark(PatternMark::segment((0.0, 0.0), (10.0, 10.0), css("#2e5e2e"), 1.0)),
            Self::Cement => tile
                .with_background(css("#b0b0b0"))
                .with_mark(PatternMark::dot(3.0, 4.0, 0.7, css("#444")))
                .with_mark(PatternMark::segment((6.0, 7.0), (8.0, 9.0), css("#444"), 0.8)),
            Self::Cuttings => tile
                .with_background(css("#deb887").with_alpha(0.4))
                .with_mark(PatternMark::dot(2.0, 7.0, 0.8, css("#6b4423")))
                .with_mark(PatternMark::segment((5.0, 2.0), (8.0, 4.0), css("#6b4423"), 0.8)),
            Self::Unclassified => tile.with_background(css("#f5f5f5")),
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

fn css(value: &str) -> Color {
    Color::new(value).unwrap_or_default()
}
