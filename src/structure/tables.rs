//! Table detection from column alignment.
//!
//! Each line is cut into segments wherever the gap between two tokens is
//! wider than `min_column_gap`, so the words of one phrase stay together.
//! The distinct segment x-starts, rounded to `bucket`-unit buckets, are the
//! line's column positions. A line with at least `min_columns` positions
//! opens a candidate and records them; following lines extend the candidate
//! while they also have `min_columns` positions and at least `min_aligned` of
//! them lie within `tolerance` of a recorded position. Candidates shorter
//! than `min_rows` lines are released as ordinary lines.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Line, TableBlock};
use crate::options::TableOptions;
use crate::text::collapse_whitespace;

static RE_CELL_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{3,}").unwrap());

/// A line left as text, or a run of lines promoted to a table.
#[derive(Debug, Clone, PartialEq)]
pub enum PageItem {
    /// Ordinary text line
    Line(Line),
    /// Promoted table
    Table(TableBlock),
}

/// Detects tables in a page's lines.
#[derive(Debug, Clone, Default)]
pub struct TableDetector {
    options: TableOptions,
}

impl TableDetector {
    /// Create a detector with the given thresholds.
    pub fn new(options: TableOptions) -> Self {
        Self { options }
    }

    /// Replace every qualifying run of aligned lines with a table, in place.
    pub fn detect(&self, lines: Vec<Line>) -> Vec<PageItem> {
        let mut items = Vec::with_capacity(lines.len());
        let mut candidate: Vec<Line> = Vec::new();
        let mut positions: Vec<f32> = Vec::new();

        for line in lines {
            let starts = line.column_starts(self.options.bucket, self.options.min_column_gap);

            if !candidate.is_empty() && self.extends(&candidate, &positions, &line, &starts) {
                candidate.push(line);
                continue;
            }

            self.close(&mut candidate, &mut items);

            if starts.len() >= self.options.min_columns {
                positions = starts;
                candidate.push(line);
            } else {
                items.push(PageItem::Line(line));
            }
        }

        self.close(&mut candidate, &mut items);
        items
    }

    fn extends(&self, candidate: &[Line], positions: &[f32], line: &Line, starts: &[f32]) -> bool {
        if starts.len() < self.options.min_columns
            || candidate.last().is_some_and(|last| last.bucket != line.bucket)
        {
            return false;
        }
        let aligned = starts
            .iter()
            .filter(|s| {
                positions
                    .iter()
                    .any(|p| (*s - p).abs() <= self.options.tolerance)
            })
            .count();
        aligned >= self.options.min_aligned
    }

    fn close(&self, candidate: &mut Vec<Line>, items: &mut Vec<PageItem>) {
        if candidate.is_empty() {
            return;
        }
        let lines = std::mem::take(candidate);

        if lines.len() >= self.options.min_rows {
            let rows: Vec<Vec<String>> = lines
                .iter()
                .map(|line| split_cells(line, self.options.min_column_gap))
                .collect();
            log::debug!(
                "Table promoted: {} rows, {} columns",
                rows.len(),
                rows.iter().map(Vec::len).max().unwrap_or(0)
            );
            items.push(PageItem::Table(TableBlock::new(rows)));
        } else {
            log::debug!("Table candidate of {} line(s) rejected", lines.len());
            items.extend(lines.into_iter().map(PageItem::Line));
        }
    }
}

/// Cells of one table line.
///
/// Text is split on runs of three or more spaces. When the joined text has no
/// such runs each column segment becomes one cell.
fn split_cells(line: &Line, min_gap: f32) -> Vec<String> {
    let cells: Vec<String> = RE_CELL_SEPARATOR
        .split(line.text.trim())
        .map(collapse_whitespace)
        .filter(|c| !c.is_empty())
        .collect();

    if cells.len() > 1 {
        return cells;
    }

    line.segments(min_gap)
        .iter()
        .map(|segment| {
            let text: Vec<&str> = segment.iter().map(|t| t.text.as_str()).collect();
            collapse_whitespace(&text.join(" "))
        })
        .filter(|c| !c.is_empty())
        .collect()
}
