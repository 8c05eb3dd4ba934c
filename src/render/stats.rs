//! Conversion statistics.

use serde::{Deserialize, Serialize};

use crate::model::{Block, Document};

/// Counts of what a conversion produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Number of source pages
    pub page_count: u32,

    /// Number of headings
    pub heading_count: u32,

    /// Number of paragraphs (including emphasised lines)
    pub paragraph_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of list items
    pub list_item_count: u32,

    /// Number of extracted links
    pub link_count: u32,

    /// Number of numbered reference entries
    pub reference_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics from a finished document.
    pub fn from_document(doc: &Document) -> Self {
        let mut stats = Self::new();
        stats.page_count = doc.page_count as u32;
        for block in &doc.blocks {
            stats.add_block(block);
        }
        stats
    }

    /// Count one block.
    pub fn add_block(&mut self, block: &Block) {
        match block {
            Block::Heading { .. } => self.heading_count += 1,
            Block::Paragraph { .. } | Block::Emphasis { .. } => self.paragraph_count += 1,
            Block::ListItem { .. } => self.list_item_count += 1,
            Block::Table(table) => {
                self.table_count += 1;
                for row in &table.rows {
                    for cell in row {
                        self.count_text(cell);
                    }
                }
            }
            Block::Link { .. } => self.link_count += 1,
            Block::ReferenceEntry { .. } => self.reference_count += 1,
            Block::TableOfContents { .. } | Block::Rule | Block::PageBreak => {}
        }

        if !matches!(block, Block::Link { .. }) {
            if let Some(text) = block.text() {
                self.count_text(text);
            }
        }
    }

    /// Add word counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
    }
}
