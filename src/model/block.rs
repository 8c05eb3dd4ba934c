//! Block-level types: the classified units of the output document.

use serde::{Deserialize, Serialize};

/// A classified Markdown unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading (levels 1-3)
    Heading {
        /// Heading level
        level: u8,
        /// Heading text
        text: String,
    },

    /// A plain paragraph line (possibly merged from several print lines)
    Paragraph {
        /// Paragraph text
        text: String,
    },

    /// An italic line (article metadata such as "Received ...")
    Emphasis {
        /// Line text
        text: String,
    },

    /// A list item with its nesting depth
    ListItem {
        /// Nesting depth (0 = top level)
        depth: usize,
        /// Item text without its marker
        text: String,
    },

    /// A table promoted from aligned lines
    Table(TableBlock),

    /// A DOI or URL extracted from a text line
    Link {
        /// Target URL, rendered as `[url](url)`
        url: String,
    },

    /// A numbered entry of the reference section
    ReferenceEntry {
        /// Sequential number, starting at 1
        number: usize,
        /// Reference text without any original numbering
        text: String,
    },

    /// Generated table of contents
    TableOfContents {
        /// Entries in document order
        entries: Vec<TocEntry>,
    },

    /// A horizontal rule
    Rule,

    /// Boundary between two source pages
    PageBreak,
}

impl Block {
    /// Create a heading block.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level: level.clamp(1, 3),
            text: text.into(),
        }
    }

    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    /// Create an emphasis block.
    pub fn emphasis(text: impl Into<String>) -> Self {
        Block::Emphasis { text: text.into() }
    }

    /// Create a link block.
    pub fn link(url: impl Into<String>) -> Self {
        Block::Link { url: url.into() }
    }

    /// Text carried by the block, if it is a single-text block.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Heading { text, .. }
            | Block::Paragraph { text }
            | Block::Emphasis { text }
            | Block::ListItem { text, .. }
            | Block::ReferenceEntry { text, .. } => Some(text),
            Block::Link { url } => Some(url),
            _ => None,
        }
    }

    /// Mutable access to the block's text.
    pub fn text_mut(&mut self) -> Option<&mut String> {
        match self {
            Block::Heading { text, .. }
            | Block::Paragraph { text }
            | Block::Emphasis { text }
            | Block::ListItem { text, .. }
            | Block::ReferenceEntry { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Heading level, if this is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Block::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }

    /// Check if this block is a plain paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph { .. })
    }

    /// Check if this block is a list item.
    pub fn is_list_item(&self) -> bool {
        matches!(self, Block::ListItem { .. })
    }
}

/// A table rendered as a Markdown grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableBlock {
    /// Cell text per source line
    pub rows: Vec<Vec<String>>,
}

impl TableBlock {
    /// Create a table from rows of cells.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Number of columns: the largest cell count across all rows.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One line of the generated table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Heading level (1-3)
    pub level: u8,
    /// Display title
    pub title: String,
    /// Anchor slug, without the leading `#`
    pub slug: String,
}
