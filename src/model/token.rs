//! Token-level types.

use serde::{Deserialize, Serialize};

/// Average character width as a fraction of the glyph height.
const GLYPH_WIDTH_EM: f32 = 0.5;

/// One run of text at a page position, as produced by the extraction layer.
///
/// Coordinates follow the PDF convention: `y` grows upwards, so the top of
/// the page has the largest `y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the run
    pub text: String,

    /// X position of the left edge
    pub x: f32,

    /// Y position (baseline)
    pub y: f32,

    /// Glyph height (effective font size)
    pub height: f32,
}

impl Token {
    /// Create a new token.
    pub fn new(text: impl Into<String>, x: f32, y: f32, height: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            height,
        }
    }

    /// Check whether the run carries any visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Estimated right edge of the run.
    ///
    /// Extraction reports no widths, so each character is taken to be half
    /// the glyph height wide.
    pub fn estimated_end(&self) -> f32 {
        self.x + self.text.chars().count() as f32 * self.height * GLYPH_WIDTH_EM
    }

    /// Check whether all coordinates are usable numbers.
    pub fn has_finite_geometry(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.height.is_finite()
    }
}
