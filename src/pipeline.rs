//! Conversion pipeline.
//!
//! Pages are pulled from the [`PageSource`] one at a time, in order. Each
//! page is then laid out and structured on its own (in parallel on the rayon
//! pool when enabled); the page results are joined with page breaks and the
//! document-level passes run once over the assembled block list.

use crossbeam_channel::Sender;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::LineBuilder;
use crate::model::{Block, Document, Token};
use crate::options::LayoutOptions;
use crate::source::{canonicalize, PageSource};
use crate::structure::{
    clean_blocks, format_references, insert_table_of_contents, merge_front_matter,
    PageStructurer,
};

/// Progress events emitted at page boundaries.
///
/// Page numbers are 1-indexed. Events never influence the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progress {
    /// A page's tokens were extracted
    PageExtracted {
        /// Page number
        page: usize,
        /// Total pages
        total: usize,
    },
    /// A page's blocks were built
    PageStructured {
        /// Page number
        page: usize,
        /// Total pages
        total: usize,
    },
    /// The document is complete
    Finished {
        /// Number of blocks in the document
        blocks: usize,
    },
}

/// Runs the full token-to-document conversion.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: LayoutOptions,
    progress: Option<Sender<Progress>>,
}

impl Pipeline {
    /// Create a pipeline with the given options.
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            options,
            progress: None,
        }
    }

    /// Report progress on a channel.
    pub fn with_progress(mut self, sender: Sender<Progress>) -> Self {
        self.progress = Some(sender);
        self
    }

    /// The options in use.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Convert every page of `source` into a document.
    ///
    /// Fails on the first page the source cannot extract; nothing is
    /// returned for the pages before it.
    pub fn run<S: PageSource + ?Sized>(&self, source: &S) -> Result<Document> {
        let total = source.page_count();
        let pages = self.extract(source, total)?;

        let structurer = PageStructurer::new(&self.options);
        let builder = LineBuilder::new(&self.options);
        let structure_page = |(index, tokens): (usize, Vec<Token>)| {
            let lines = builder.build(tokens);
            let blocks = structurer.structure(lines);
            log::debug!("Page {}: {} blocks", index + 1, blocks.len());
            self.report(Progress::PageStructured {
                page: index + 1,
                total,
            });
            blocks
        };

        let per_page: Vec<Vec<Block>> = if self.options.parallel && total > 1 {
            pages.into_par_iter().enumerate().map(structure_page).collect()
        } else {
            pages.into_iter().enumerate().map(structure_page).collect()
        };

        let blocks = self.finish(per_page);
        self.report(Progress::Finished {
            blocks: blocks.len(),
        });
        Ok(Document::from_blocks(blocks, total))
    }

    fn extract<S: PageSource + ?Sized>(&self, source: &S, total: usize) -> Result<Vec<Vec<Token>>> {
        let mut pages = Vec::with_capacity(total);
        for index in 0..total {
            let tokens = source.extract_page(index).map_err(|e| match e {
                Error::Extraction { .. } => e,
                other => Error::extraction(index + 1, other),
            })?;
            log::debug!("Page {}: {} tokens", index + 1, tokens.len());
            pages.push(canonicalize(index, tokens));
            self.report(Progress::PageExtracted {
                page: index + 1,
                total,
            });
        }
        Ok(pages)
    }

    /// Join per-page blocks and run the document-level passes.
    fn finish(&self, per_page: Vec<Vec<Block>>) -> Vec<Block> {
        let mut blocks = Vec::new();
        for (i, page) in per_page.into_iter().enumerate() {
            if i > 0 {
                blocks.push(Block::PageBreak);
            }
            blocks.extend(page);
        }

        if self.options.front_matter_merge {
            blocks = merge_front_matter(blocks);
        }
        let blocks = clean_blocks(format_references(blocks));

        if self.options.table_of_contents {
            insert_table_of_contents(blocks)
        } else {
            blocks
        }
    }

    fn report(&self, event: Progress) {
        if let Some(sender) = &self.progress {
            // A dropped receiver only means nobody is listening.
            let _ = sender.send(event);
        }
    }
}
