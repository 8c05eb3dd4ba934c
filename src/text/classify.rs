//! Line classification.
//!
//! A [`Classifier`] holds an ordered list of named [`LineRule`]s. The first
//! rule that claims a line decides its [`LineKind`]; a line no rule claims is
//! a paragraph.

use crate::options::HeadingThresholds;

use super::normalize::is_citation_residue;

/// What a single line of text is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Heading of the given level (1-3)
    Heading(u8),
    /// Italic metadata line
    Emphasis,
    /// Body text
    Paragraph,
    /// Nothing worth emitting (bare citation numbers)
    Suppressed,
}

/// One classification rule.
pub trait LineRule: Send + Sync {
    /// Rule name, for logging.
    fn name(&self) -> &'static str;

    /// Classify the line, or return `None` to defer to the next rule.
    fn apply(&self, text: &str, height: f32) -> Option<LineKind>;
}

/// Lines reduced to digits and commas once their citation prefix is gone.
#[derive(Debug, Clone, Copy, Default)]
pub struct CitationResidue;

impl LineRule for CitationResidue {
    fn name(&self) -> &'static str {
        "citation-residue"
    }

    fn apply(&self, text: &str, _height: f32) -> Option<LineKind> {
        is_citation_residue(text).then_some(LineKind::Suppressed)
    }
}

/// Headings by glyph height.
#[derive(Debug, Clone, Default)]
pub struct HeadingByHeight {
    thresholds: HeadingThresholds,
}

impl HeadingByHeight {
    /// Create the rule with the given thresholds.
    pub fn new(thresholds: HeadingThresholds) -> Self {
        Self { thresholds }
    }
}

impl LineRule for HeadingByHeight {
    fn name(&self) -> &'static str {
        "heading-by-height"
    }

    fn apply(&self, _text: &str, height: f32) -> Option<LineKind> {
        self.thresholds.level_for(height).map(LineKind::Heading)
    }
}

/// Article metadata printed in italics ("Received 3 May 2021", ...).
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataLine;

const METADATA_PREFIXES: &[&str] = &[
    "Received",
    "Accepted",
    "Published",
    "Open access",
    "Check for updates",
];

impl LineRule for MetadataLine {
    fn name(&self) -> &'static str {
        "metadata"
    }

    fn apply(&self, text: &str, _height: f32) -> Option<LineKind> {
        let text = text.trim_start();
        METADATA_PREFIXES
            .iter()
            .any(|prefix| text.starts_with(prefix))
            .then_some(LineKind::Emphasis)
    }
}

/// Ordered rule list.
pub struct Classifier {
    rules: Vec<Box<dyn LineRule>>,
}

impl Classifier {
    /// Create a classifier with the standard rules.
    pub fn new(thresholds: HeadingThresholds) -> Self {
        Self {
            rules: vec![
                Box::new(CitationResidue),
                Box::new(HeadingByHeight::new(thresholds)),
                Box::new(MetadataLine),
            ],
        }
    }

    /// Create a classifier from an explicit rule list.
    pub fn with_rules(rules: Vec<Box<dyn LineRule>>) -> Self {
        Self { rules }
    }

    /// Names of the rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Classify a line whose citation prefix has already been stripped.
    pub fn classify(&self, text: &str, height: f32) -> LineKind {
        for rule in &self.rules {
            if let Some(kind) = rule.apply(text, height) {
                log::trace!("{:?} -> {:?} ({})", text, kind, rule.name());
                return kind;
            }
        }
        LineKind::Paragraph
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(HeadingThresholds::default())
    }
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("rules", &self.rule_names())
            .finish()
    }
}
