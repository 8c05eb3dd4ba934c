//! Visual lines built from tokens.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Token;

/// Which part of the page a line was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnBucket {
    /// Page without a column split
    Single,
    /// Row spanning both columns (typically a heading)
    FullWidth,
    /// Left column of a two-column page
    Left,
    /// Right column of a two-column page
    Right,
}

/// Tokens sharing one visual row, ordered left to right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Token texts joined with single spaces
    pub text: String,

    /// Largest glyph height among the tokens
    pub height: f32,

    /// Row position (bucketed baseline)
    pub y: f32,

    /// Column bucket the line was assigned to
    pub bucket: ColumnBucket,

    /// The tokens the line was built from, sorted by X
    pub tokens: Vec<Token>,
}

impl Line {
    /// Build a line from the tokens of one row.
    ///
    /// Tokens are sorted by X and consecutive tokens with identical text are
    /// collapsed into one (an extraction artifact). Returns `None` when no
    /// visible text remains.
    pub fn from_tokens(mut tokens: Vec<Token>, y: f32, bucket: ColumnBucket) -> Option<Self> {
        tokens.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
        tokens.dedup_by(|next, prev| next.text.trim() == prev.text.trim());

        let text = tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        if text.trim().is_empty() {
            return None;
        }

        let height = tokens.iter().map(|t| t.height).fold(0.0_f32, f32::max);

        Some(Self {
            text,
            height,
            y,
            bucket,
            tokens,
        })
    }

    /// Runs of tokens separated by gaps wider than `min_gap`.
    ///
    /// A gap is measured from the estimated end of one token to the start of
    /// the next, so ordinary word spacing keeps a phrase in one segment.
    pub fn segments(&self, min_gap: f32) -> Vec<&[Token]> {
        let mut segments = Vec::new();
        let mut start = 0;
        for i in 1..self.tokens.len() {
            if self.tokens[i].x - self.tokens[i - 1].estimated_end() > min_gap {
                segments.push(&self.tokens[start..i]);
                start = i;
            }
        }
        if start < self.tokens.len() {
            segments.push(&self.tokens[start..]);
        }
        segments
    }

    /// Distinct segment x-starts, rounded to `bucket`-unit buckets, ascending.
    pub fn column_starts(&self, bucket: f32, min_gap: f32) -> Vec<f32> {
        let bucket = if bucket > 0.0 { bucket } else { 1.0 };
        let keys: BTreeSet<i64> = self
            .segments(min_gap)
            .iter()
            .filter_map(|segment| segment.first())
            .map(|t| (t.x / bucket).round() as i64)
            .collect();
        keys.into_iter().map(|k| k as f32 * bucket).collect()
    }

    /// Average X of the line's tokens.
    pub fn mean_x(&self) -> f32 {
        if self.tokens.is_empty() {
            return 0.0;
        }
        self.tokens.iter().map(|t| t.x).sum::<f32>() / self.tokens.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_joins_and_sorts() {
        let line = Line::from_tokens(
            vec![
                Token::new("world", 60.0, 100.0, 10.0),
                Token::new("Hello", 10.0, 100.0, 12.0),
            ],
            100.0,
            ColumnBucket::Single,
        )
        .unwrap();
        assert_eq!(line.text, "Hello world");
        assert_eq!(line.height, 12.0);
    }

    #[test]
    fn test_line_dedups_consecutive_tokens() {
        let line = Line::from_tokens(
            vec![
                Token::new("Results", 10.0, 100.0, 10.0),
                Token::new("Results", 11.0, 100.0, 10.0),
                Token::new("and", 60.0, 100.0, 10.0),
                Token::new("Results", 90.0, 100.0, 10.0),
            ],
            100.0,
            ColumnBucket::Single,
        )
        .unwrap();
        assert_eq!(line.text, "Results and Results");
        assert_eq!(line.tokens.len(), 3);
    }

    #[test]
    fn test_blank_line_is_dropped() {
        let line = Line::from_tokens(
            vec![Token::new("  ", 10.0, 100.0, 10.0)],
            100.0,
            ColumnBucket::Single,
        );
        assert!(line.is_none());
    }

    #[test]
    fn test_column_starts_bucketed() {
        let line = Line::from_tokens(
            vec![
                Token::new("a", 49.0, 0.0, 10.0),
                Token::new("b", 51.0, 0.0, 10.0),
                Token::new("c", 152.0, 0.0, 10.0),
                Token::new("d", 301.0, 0.0, 10.0),
            ],
            0.0,
            ColumnBucket::Single,
        )
        .unwrap();
        assert_eq!(line.column_starts(5.0, 15.0), vec![50.0, 150.0, 300.0]);
    }

    #[test]
    fn test_words_form_one_segment() {
        // "Smith" ends near x=125; the next word follows at normal spacing.
        let line = Line::from_tokens(
            vec![
                Token::new("Smith", 100.0, 0.0, 10.0),
                Token::new("J.", 130.0, 0.0, 10.0),
                Token::new("Reading", 145.0, 0.0, 10.0),
                Token::new("2019", 300.0, 0.0, 10.0),
            ],
            0.0,
            ColumnBucket::Single,
        )
        .unwrap();
        let segments = line.segments(15.0);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 3);
        assert_eq!(line.column_starts(5.0, 15.0), vec![100.0, 300.0]);
    }
}
