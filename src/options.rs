//! Layout options and thresholds.
//!
//! The defaults reproduce the reference heuristics exactly; every threshold
//! is exposed so callers can tune them for unusual page geometries.

use serde::{Deserialize, Serialize};

/// Options for reconstructing a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Column detection and assignment
    pub columns: ColumnOptions,

    /// Row bucket height for grouping tokens into lines
    pub row_bucket: f32,

    /// Glyph-height thresholds for heading levels
    pub headings: HeadingThresholds,

    /// Table detection
    pub tables: TableOptions,

    /// Prepend a generated table of contents
    pub table_of_contents: bool,

    /// Merge the "Article" / title / authors front matter into one heading
    pub front_matter_merge: bool,

    /// Process pages on the rayon thread pool
    pub parallel: bool,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set column options.
    pub fn with_columns(mut self, columns: ColumnOptions) -> Self {
        self.columns = columns;
        self
    }

    /// Set heading thresholds.
    pub fn with_headings(mut self, headings: HeadingThresholds) -> Self {
        self.headings = headings;
        self
    }

    /// Set table options.
    pub fn with_tables(mut self, tables: TableOptions) -> Self {
        self.tables = tables;
        self
    }

    /// Enable or disable the table of contents.
    pub fn with_table_of_contents(mut self, enabled: bool) -> Self {
        self.table_of_contents = enabled;
        self
    }

    /// Enable or disable the front-matter merge rule.
    pub fn with_front_matter_merge(mut self, enabled: bool) -> Self {
        self.front_matter_merge = enabled;
        self
    }

    /// Enable or disable parallel page processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel page processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            columns: ColumnOptions::default(),
            row_bucket: 2.0,
            headings: HeadingThresholds::default(),
            tables: TableOptions::default(),
            table_of_contents: true,
            front_matter_merge: true,
            parallel: true,
        }
    }
}

/// Column segmentation thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnOptions {
    /// Fewer tokens than this means single column
    pub min_tokens: usize,
    /// Smallest x-gap that can separate two columns
    pub min_gap: f32,
    /// The gap must lie above this fraction of the sorted x-origins
    pub lower_percentile: f32,
    /// The gap must lie below this fraction of the sorted x-origins
    pub upper_percentile: f32,
    /// Rows whose mean x is this close to the split may span both columns
    pub full_width_distance: f32,
    /// Rows with more tokens than this never span both columns
    pub full_width_max_tokens: usize,
    /// Dead zone on each side of the split
    pub gutter_margin: f32,
}

impl Default for ColumnOptions {
    fn default() -> Self {
        Self {
            min_tokens: 30,
            min_gap: 80.0,
            lower_percentile: 0.2,
            upper_percentile: 0.8,
            full_width_distance: 60.0,
            full_width_max_tokens: 4,
            gutter_margin: 5.0,
        }
    }
}

/// Glyph-height thresholds. A line is a heading of a level when its height
/// is strictly greater than that level's threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingThresholds {
    /// Heading 1 above this height
    pub h1: f32,
    /// Heading 2 above this height
    pub h2: f32,
    /// Heading 3 above this height
    pub h3: f32,
}

impl HeadingThresholds {
    /// Heading level for a glyph height, or `None` for body text.
    pub fn level_for(&self, height: f32) -> Option<u8> {
        if height > self.h1 {
            Some(1)
        } else if height > self.h2 {
            Some(2)
        } else if height > self.h3 {
            Some(3)
        } else {
            None
        }
    }
}

impl Default for HeadingThresholds {
    fn default() -> Self {
        Self {
            h1: 26.0,
            h2: 19.0,
            h3: 14.0,
        }
    }
}

/// Table detection thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Minimum lines in a promoted table
    pub min_rows: usize,
    /// Minimum distinct column positions to open a candidate
    pub min_columns: usize,
    /// Minimum aligned positions for a line to extend a candidate
    pub min_aligned: usize,
    /// Alignment tolerance in layout units
    pub tolerance: f32,
    /// Bucket width for rounding column x-starts
    pub bucket: f32,
    /// Gap between tokens, beyond word spacing, that starts a new column
    pub min_column_gap: f32,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            min_rows: 3,
            min_columns: 3,
            min_aligned: 2,
            tolerance: 10.0,
            bucket: 5.0,
            min_column_gap: 15.0,
        }
    }
}
