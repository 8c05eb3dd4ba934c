//! Grouping tokens into visual lines.

use std::collections::BTreeMap;

use super::columns::detect_split;
use crate::model::{ColumnBucket, Line, Token};
use crate::options::LayoutOptions;

/// Builds the lines of one page in approximate reading order.
#[derive(Debug, Clone, Copy)]
pub struct LineBuilder<'a> {
    options: &'a LayoutOptions,
}

impl<'a> LineBuilder<'a> {
    /// Create a line builder.
    pub fn new(options: &'a LayoutOptions) -> Self {
        Self { options }
    }

    /// Detect the column split and build the page's lines.
    pub fn build(&self, tokens: Vec<Token>) -> Vec<Line> {
        let split = detect_split(&tokens, &self.options.columns);
        self.build_with_split(tokens, split)
    }

    /// Build lines for a page whose column split is already known.
    ///
    /// Emission order is full-width rows top to bottom, then the left column
    /// top to bottom, then the right column. Without a split every row becomes
    /// a single-column line.
    pub fn build_with_split(&self, tokens: Vec<Token>, split: Option<f32>) -> Vec<Line> {
        let rows = self.group_rows(tokens);

        let Some(split) = split else {
            return rows
                .into_iter()
                .rev()
                .filter_map(|(y, row)| Line::from_tokens(row, y, ColumnBucket::Single))
                .collect();
        };

        let columns = &self.options.columns;
        let mut full_width = Vec::new();
        let mut left = Vec::new();
        let mut right = Vec::new();

        for (y, row) in rows.into_iter().rev() {
            let mean_x = row.iter().map(|t| t.x).sum::<f32>() / row.len() as f32;

            if (mean_x - split).abs() <= columns.full_width_distance
                && row.len() <= columns.full_width_max_tokens
            {
                full_width.extend(Line::from_tokens(row, y, ColumnBucket::FullWidth));
                continue;
            }

            let (mut left_row, mut right_row) = (Vec::new(), Vec::new());
            for token in row {
                if token.x < split - columns.gutter_margin {
                    left_row.push(token);
                } else if token.x > split + columns.gutter_margin {
                    right_row.push(token);
                } else {
                    log::trace!("Token {:?} in gutter at x={:.1}, skipped", token.text, token.x);
                }
            }

            if !left_row.is_empty() {
                left.extend(Line::from_tokens(left_row, y, ColumnBucket::Left));
            }
            if !right_row.is_empty() {
                right.extend(Line::from_tokens(right_row, y, ColumnBucket::Right));
            }
        }

        log::debug!(
            "Lines: full-width={}, left={}, right={}",
            full_width.len(),
            left.len(),
            right.len()
        );

        full_width.extend(left);
        full_width.extend(right);
        full_width
    }

    /// Group tokens by bucketed y. Keys ascend, so the top row comes last.
    fn group_rows(&self, tokens: Vec<Token>) -> Vec<(f32, Vec<Token>)> {
        let bucket = if self.options.row_bucket > 0.0 {
            self.options.row_bucket
        } else {
            1.0
        };

        let mut rows: BTreeMap<i64, Vec<Token>> = BTreeMap::new();
        for token in tokens {
            let key = (token.y / bucket).round() as i64;
            rows.entry(key).or_default().push(token);
        }

        rows.into_iter()
            .map(|(key, row)| (key as f32 * bucket, row))
            .collect()
    }
}
