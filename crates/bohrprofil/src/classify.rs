//! Keyword classification of category tags.
//!
//! Each column role has an ordered rule table. A [`Rule`] matches when the
//! lowercased text contains at least one `any` keyword, every `all` keyword
//! and no `none` keyword. The first matching rule wins; when nothing matches
//! the result is [`Style::Unclassified`]. Classification never fails.
//!
//! # Geology rule order
//!
//! The built-in geology table is ordered by the following policy:
//!
//! 1. Topsoil, made ground and peat are checked first. They describe the
//!    origin of a layer and win over any grain size mentioned with them.
//! 2. Rock comes before every granular class, so `Sandstein` or
//!    `Sandgestein` is rock, not sand.
//! 3. Cohesive soils (clay, silt) come before the granular soils but exclude
//!    their own adjective forms. `sandy clay` is clay, while `Sand, tonig`
//!    (clayey sand) falls through to sand.
//! 4. Sand/gravel mixtures come before pure gravel and pure sand.

use log::trace;
use serde::Deserialize;

use crate::{config::ClassificationConfig, model::ColumnRole, style::Style};

/// One classification rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Rule {
    style: Style,
    #[serde(default)]
    any: Vec<String>,
    #[serde(default)]
    all: Vec<String>,
    #[serde(default)]
    none: Vec<String>,
}

impl Rule {
    /// A rule that matches when any of `keywords` occurs.
    pub fn any(style: Style, keywords: &[&str]) -> Self {
        Self {
            style,
            any: lowercase_all(keywords),
            all: Vec::new(),
            none: Vec::new(),
        }
    }

    /// A rule that matches when all of `keywords` occur.
    pub fn all(style: Style, keywords: &[&str]) -> Self {
        Self {
            style,
            any: Vec::new(),
            all: lowercase_all(keywords),
            none: Vec::new(),
        }
    }

    /// Excludes texts containing any of `keywords`.
    pub fn excluding(mut self, keywords: &[&str]) -> Self {
        self.none.extend(lowercase_all(keywords));
        self
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Lowercases the keywords of a rule loaded from configuration.
    fn normalized(self) -> Self {
        let lower = |words: Vec<String>| -> Vec<String> {
            words.iter().map(|w| w.to_lowercase()).collect()
        };
        Self {
            style: self.style,
            any: lower(self.any),
            all: lower(self.all),
            none: lower(self.none),
        }
    }

    /// Tests the rule against already lowercased text.
    ///
    /// A rule without `any` and `all` keywords never matches.
    pub fn matches(&self, text: &str) -> bool {
        if self.any.is_empty() && self.all.is_empty() {
            return false;
        }
        let any = self.any.is_empty() || self.any.iter().any(|k| text.contains(k.as_str()));
        let all = self.all.iter().all(|k| text.contains(k.as_str()));
        let none = self.none.iter().any(|k| text.contains(k.as_str()));
        any && all && !none
    }
}

fn lowercase_all(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|k| k.to_lowercase()).collect()
}

/// Built-in rule table for a column role. See the module documentation for
/// the geology ordering policy.
pub fn default_rules(role: ColumnRole) -> Vec<Rule> {
    match role {
        ColumnRole::Geology => vec![
            Rule::any(Style::Topsoil, &["mutterboden", "oberboden", "humus", "topsoil"]),
            Rule::any(
                Style::Fill,
                &["auffüllung", "auffuellung", "aufschüttung", "made ground", "fill"],
            ),
            Rule::any(Style::Peat, &["torf", "peat"]),
            Rule::any(
                Style::Rock,
                &[
                    "fels", "gestein", "sandstein", "kalkstein", "tonstein", "schiefer",
                    "granit", "basalt", "rock", "stone", "bedrock",
                ],
            ),
            Rule::any(Style::Clay, &["lehm", "mergel", "clay", "loam", "marl"])
                .excluding(&["lehmig", "loamy", "clayey"]),
            Rule::any(Style::Clay, &["ton"]).excluding(&["tonig"]),
            Rule::any(Style::Silt, &["schluff", "silt"]).excluding(&["schluffig", "silty"]),
            Rule::any(
                Style::SandGravel,
                &["sand/kies", "kiessand", "sandy gravel", "gravelly sand"],
            ),
            Rule::all(Style::SandGravel, &["sand", "kies"]),
            Rule::all(Style::SandGravel, &["sand", "gravel"]),
            Rule::any(Style::Gravel, &["kies", "gravel", "schotter", "geröll"]),
            Rule::any(Style::Sand, &["sand"]),
        ],
        ColumnRole::Casing => vec![
            Rule::any(Style::SumpPipe, &["sumpf", "sump"]),
            Rule::any(
                Style::ScreenPipe,
                &["filter", "screen", "schlitz", "slotted"],
            ),
            Rule::any(
                Style::SolidPipe,
                &["vollrohr", "solid", "blind", "aufsatz", "casing", "riser"],
            ),
        ],
        ColumnRole::Annulus => vec![
            Rule::any(
                Style::Cement,
                &["zement", "cement", "beton", "grout", "dämmer", "daemmer"],
            ),
            Rule::any(
                Style::ClaySeal,
                &["ton", "bentonit", "compactonit", "quellton", "clay", "seal", "sperre"],
            ),
            Rule::any(
                Style::GravelPack,
                &["filterkies", "filtersand", "kies", "gravel", "sand", "pack"],
            ),
            Rule::any(
                Style::Cuttings,
                &["bohrgut", "cuttings", "verfüllung", "verfuellung", "backfill", "aushub"],
            ),
        ],
    }
}

/// Rule tables for all column roles, built once per renderer.
#[derive(Debug, Clone)]
pub struct Classifier {
    geology: Vec<Rule>,
    casing: Vec<Rule>,
    annulus: Vec<Rule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            geology: default_rules(ColumnRole::Geology),
            casing: default_rules(ColumnRole::Casing),
            annulus: default_rules(ColumnRole::Annulus),
        }
    }
}

impl Classifier {
    /// Builds the tables from configuration. Configured rules are evaluated
    /// before the built-in ones, or alone when `replace_defaults` is set.
    pub fn new(config: &ClassificationConfig) -> Self {
        let table = |role: ColumnRole, configured: &[Rule]| {
            let mut rules: Vec<Rule> = configured.iter().cloned().map(Rule::normalized).collect();
            if !config.replace_defaults() {
                rules.extend(default_rules(role));
            }
            rules
        };
        Self {
            geology: table(ColumnRole::Geology, config.rules(ColumnRole::Geology)),
            casing: table(ColumnRole::Casing, config.rules(ColumnRole::Casing)),
            annulus: table(ColumnRole::Annulus, config.rules(ColumnRole::Annulus)),
        }
    }

    pub fn rules(&self, role: ColumnRole) -> &[Rule] {
        match role {
            ColumnRole::Geology => &self.geology,
            ColumnRole::Casing => &self.casing,
            ColumnRole::Annulus => &self.annulus,
        }
    }

    /// Classifies `tag`, falling back to the auxiliary strings in order.
    pub fn classify(&self, role: ColumnRole, tag: &str, auxiliary: &[&str]) -> Style {
        let rules = self.rules(role);
        std::iter::once(tag)
            .chain(auxiliary.iter().copied())
            .find_map(|text| {
                let text = text.to_lowercase();
                rules.iter().find(|rule| rule.matches(&text)).map(Rule::style)
            })
            .unwrap_or_else(|| {
                trace!(role = role.name(), tag; "No classification rule matched");
                Style::Unclassified
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geology(tag: &str) -> Style {
        Classifier::default().classify(ColumnRole::Geology, tag, &[])
    }

    #[test]
    fn test_geology_ordering_policy() {
        assert_eq!(geology("Mutterboden"), Style::Topsoil);
        assert_eq!(geology("sandy clay"), Style::Clay);
        assert_eq!(geology("Sand, tonig"), Style::Sand);
        assert_eq!(geology("Sandgestein"), Style::Rock);
        assert_eq!(geology("Sandstein, verwittert"), Style::Rock);
        assert_eq!(geology("Sand/Kies"), Style::SandGravel);
        assert_eq!(geology("Kies, Sand, lehmig"), Style::SandGravel);
        assert_eq!(geology("Kies"), Style::Gravel);
        assert_eq!(geology("Lehm"), Style::Clay);
        assert_eq!(geology("Ton, schluffig"), Style::Clay);
        assert_eq!(geology("Schluff, sandig"), Style::Silt);
        assert_eq!(geology("Auffüllung mit Bauschutt"), Style::Fill);
        assert_eq!(geology("Fels"), Style::Rock);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(geology("MUTTERBODEN"), Style::Topsoil);
        assert_eq!(geology("KIES"), Style::Gravel);
        assert_eq!(geology("AUFFÜLLUNG"), Style::Fill);
    }

    #[test]
    fn test_unclassified() {
        assert_eq!(geology(""), Style::Unclassified);
        assert_eq!(geology("???"), Style::Unclassified);
    }

    #[test]
    fn test_auxiliary_fallback() {
        let classifier = Classifier::default();
        let style = classifier.classify(ColumnRole::Geology, "Schicht 3", &["Grobkies, steinig"]);
        assert_eq!(style, Style::Gravel);

        // The tag wins over the auxiliary text
        let style = classifier.classify(ColumnRole::Geology, "Ton", &["Kies"]);
        assert_eq!(style, Style::Clay);
    }

    #[test]
    fn test_casing_rules() {
        let classifier = Classifier::default();
        let casing = |tag| classifier.classify(ColumnRole::Casing, tag, &[]);
        assert_eq!(casing("Vollrohr DN 150"), Style::SolidPipe);
        assert_eq!(casing("Filterrohr"), Style::ScreenPipe);
        assert_eq!(casing("Sumpfrohr"), Style::SumpPipe);
        assert_eq!(casing("screened"), Style::ScreenPipe);
        assert_eq!(casing("Aufsatzrohr"), Style::SolidPipe);
    }

    #[test]
    fn test_annulus_rules() {
        let classifier = Classifier::default();
        let annulus = |tag| classifier.classify(ColumnRole::Annulus, tag, &[]);
        assert_eq!(annulus("Filterkies 2-3 mm"), Style::GravelPack);
        assert_eq!(annulus("Tonsperre"), Style::ClaySeal);
        assert_eq!(annulus("Zement-Bentonit"), Style::Cement);
        assert_eq!(annulus("Bohrgut"), Style::Cuttings);
        assert_eq!(annulus("cement grout"), Style::Cement);
    }

    #[test]
    fn test_rule_without_keywords_never_matches() {
        let rule = Rule::any(Style::Sand, &[]);
        assert!(!rule.matches("sand"));
        assert!(!rule.matches(""));
    }

    #[test]
    fn test_configured_rules_first() {
        let config: ClassificationConfig = toml::from_str(
            r#"
            [[geology]]
            style = "peat"
            any = ["Mudde"]
            "#,
        )
        .unwrap();
        let classifier = Classifier::new(&config);
        assert_eq!(
            classifier.classify(ColumnRole::Geology, "Mudde, organisch", &[]),
            Style::Peat
        );
        // Built-in rules still apply
        assert_eq!(
            classifier.classify(ColumnRole::Geology, "Kies", &[]),
            Style::Gravel
        );
    }

    #[test]
    fn test_configured_rules_replace_defaults() {
        let config: ClassificationConfig = toml::from_str(
            r#"
            replace_defaults = true

            [[geology]]
            style = "rock"
            all = ["kalk", "bank"]
            "#,
        )
        .unwrap();
        let classifier = Classifier::new(&config);
        assert_eq!(
            classifier.classify(ColumnRole::Geology, "Kalkbank", &[]),
            Style::Rock
        );
        assert_eq!(
            classifier.classify(ColumnRole::Geology, "Kies", &[]),
            Style::Unclassified
        );
        assert!(classifier.rules(ColumnRole::Casing).is_empty());
    }
}
