//! Structural post-processing.
//!
//! Page-level passes run once per page, right after its lines are built:
//! table detection, line classification, underlined and ALL-CAPS headings,
//! lists, then hyphenation and paragraph merging. Document-level passes
//! (front-matter merge, reference numbering, final cleanup, table of
//! contents) run once over the assembled block list.

mod headings;
mod lists;
mod paragraphs;
mod references;
mod tables;
mod toc;

pub use headings::{is_all_caps_heading, merge_front_matter};
pub use lists::list_item;
pub use paragraphs::is_author_line;
pub use references::format_references;
pub use tables::{PageItem, TableDetector};
pub use toc::{display_title, insert_table_of_contents, slugify};

use crate::model::{Block, Line};
use crate::options::LayoutOptions;
use crate::text::{
    extract_links, normalize_line, strip_citation_prefix, Classifier, LineKind,
};

/// A block still carrying the raw line text it came from.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Draft {
    pub(crate) block: Block,
    /// Line text before whitespace collapsing; keeps list indentation.
    pub(crate) raw: String,
}

impl Draft {
    pub(crate) fn new(block: Block, raw: impl Into<String>) -> Self {
        Self {
            block,
            raw: raw.into(),
        }
    }

    fn bare(block: Block) -> Self {
        Self::new(block, String::new())
    }
}

/// Turns one page's lines into blocks.
#[derive(Debug)]
pub struct PageStructurer {
    classifier: Classifier,
    tables: TableDetector,
}

impl PageStructurer {
    /// Create a structurer for the given options.
    pub fn new(options: &LayoutOptions) -> Self {
        Self {
            classifier: Classifier::new(options.headings.clone()),
            tables: TableDetector::new(options.tables.clone()),
        }
    }

    /// Create a structurer with a custom classifier.
    pub fn with_classifier(options: &LayoutOptions, classifier: Classifier) -> Self {
        Self {
            classifier,
            tables: TableDetector::new(options.tables.clone()),
        }
    }

    /// Build the blocks of one page.
    pub fn structure(&self, lines: Vec<Line>) -> Vec<Block> {
        let mut drafts = Vec::with_capacity(lines.len());
        for item in self.tables.detect(lines) {
            match item {
                PageItem::Table(table) => drafts.push(Draft::bare(Block::Table(table))),
                PageItem::Line(line) => self.classify_line(&line, &mut drafts),
            }
        }

        let drafts = headings::promote_underlined(drafts);
        let drafts = headings::promote_all_caps(drafts);
        let drafts = lists::format_lists(drafts);
        let drafts = paragraphs::merge_paragraphs(drafts);

        clean_blocks(drafts.into_iter().map(|d| d.block).collect())
    }

    /// Classify one line; its links follow it as separate blocks.
    fn classify_line(&self, line: &Line, drafts: &mut Vec<Draft>) {
        let extracted = extract_links(&line.text);
        let stripped = strip_citation_prefix(&extracted.text);

        let block = match self.classifier.classify(stripped, line.height) {
            LineKind::Suppressed => None,
            kind => normalize_line(stripped).map(|text| match kind {
                LineKind::Heading(level) => Block::heading(level, text),
                LineKind::Emphasis => Block::emphasis(text),
                _ => Block::paragraph(text),
            }),
        };

        if let Some(block) = block {
            drafts.push(Draft::new(block, extracted.text.as_str()));
        }
        drafts.extend(extracted.links.into_iter().map(|url| Draft::bare(Block::link(url))));
    }
}

/// Final tidy-up of an assembled document.
///
/// Text blocks are normalized once more and dropped when nothing remains,
/// empty tables are removed, and runs of page breaks collapse to one with none
/// at either end.
pub fn clean_blocks(blocks: Vec<Block>) -> Vec<Block> {
    let mut out: Vec<Block> = Vec::with_capacity(blocks.len());

    for mut block in blocks {
        match &mut block {
            Block::PageBreak => {
                if out.is_empty() || matches!(out.last(), Some(Block::PageBreak)) {
                    continue;
                }
            }
            Block::Table(table) if table.is_empty() => continue,
            Block::Link { .. } | Block::Table(_) | Block::Rule | Block::TableOfContents { .. } => {}
            other => {
                let Some(text) = other.text_mut() else {
                    continue;
                };
                match normalize_line(text) {
                    Some(clean) => *text = clean,
                    None => continue,
                }
            }
        }
        out.push(block);
    }

    while matches!(out.last(), Some(Block::PageBreak)) {
        out.pop();
    }
    out
}
