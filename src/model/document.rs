//! Document-level types.

use serde::{Deserialize, Serialize};

use super::{Block, TocEntry};

/// A reconstructed document: an ordered sequence of blocks.
///
/// When a table of contents is generated it sits at position 0, followed by
/// a horizontal rule. Source pages are separated by [`Block::PageBreak`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Blocks in reading order
    pub blocks: Vec<Block>,

    /// Number of source pages
    pub page_count: usize,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from blocks.
    pub fn from_blocks(blocks: Vec<Block>, page_count: usize) -> Self {
        Self { blocks, page_count }
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate over `(level, text)` of every heading.
    pub fn headings(&self) -> impl Iterator<Item = (u8, &str)> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Heading { level, text } => Some((*level, text.as_str())),
            _ => None,
        })
    }

    /// The generated table of contents, if any.
    pub fn table_of_contents(&self) -> Option<&[TocEntry]> {
        match self.blocks.first() {
            Some(Block::TableOfContents { entries }) => Some(entries),
            _ => None,
        }
    }

    /// Plain text of all text-bearing blocks, one per line.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Table(t) => Some(
                    t.rows
                        .iter()
                        .map(|r| r.join("\t"))
                        .collect::<Vec<_>>()
                        .join("\n"),
                ),
                Block::TableOfContents { .. } => None,
                other => other.text().map(str::to_string),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
