//! # relayout
//!
//! Document-layout reconstruction: turns positioned text runs into Markdown.
//!
//! The input is what a text-extraction layer produces for each page of a
//! paginated document: runs of text with an x/y position and a glyph height.
//! From geometry and typography alone the engine infers columns, headings,
//! paragraphs, lists, tables, links and the reference section, and emits a
//! Markdown document with a generated table of contents.
//!
//! ## Quick Start
//!
//! ```
//! use relayout::{to_markdown, MemorySource, Token};
//!
//! fn main() -> relayout::Result<()> {
//!     let source = MemorySource::new(vec![vec![
//!         Token::new("ABSTRACT", 72.0, 720.0, 28.0),
//!         Token::new("We study layouts.", 72.0, 690.0, 10.0),
//!     ]]);
//!
//!     let markdown = to_markdown(&source)?;
//!     assert!(markdown.contains("# ABSTRACT"));
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! `Token[] → Line[] → Block[] → Document`:
//!
//! - [`layout`]: column split detection and line building
//! - [`text`]: line classification, normalization, link extraction
//! - [`structure`]: tables, headings, lists, paragraph merging, references,
//!   table of contents
//! - [`render`]: Markdown and JSON output, statistics
//!
//! The core never touches a file format; token extraction is delegated to a
//! [`PageSource`].

pub mod error;
pub mod layout;
pub mod model;
pub mod options;
pub mod pipeline;
pub mod render;
pub mod source;
pub mod structure;
pub mod text;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{Block, ColumnBucket, Document, Line, TableBlock, TocEntry, Token};
pub use options::{ColumnOptions, HeadingThresholds, LayoutOptions, TableOptions};
pub use pipeline::{Pipeline, Progress};
pub use render::{ConversionStats, JsonFormat};
pub use source::{FnSource, MemorySource, PageSource, TokenDump};
pub use structure::slugify;

use crossbeam_channel::Sender;

/// Convert a document to Markdown with the default options.
///
/// # Example
///
/// ```
/// use relayout::{to_markdown, FnSource, Token};
///
/// let source = FnSource::new(1, |_| Ok(vec![Token::new("Hello there", 72.0, 700.0, 10.0)]));
/// assert_eq!(to_markdown(&source).unwrap(), "Hello there\n");
/// ```
pub fn to_markdown<S: PageSource + ?Sized>(source: &S) -> Result<String> {
    let doc = convert(source)?;
    Ok(render::render_markdown(&doc))
}

/// Reconstruct the block model of a document with the default options.
pub fn convert<S: PageSource + ?Sized>(source: &S) -> Result<Document> {
    Pipeline::new(LayoutOptions::default()).run(source)
}

/// Reconstruct a document with custom options.
pub fn convert_with_options<S: PageSource + ?Sized>(
    source: &S,
    options: LayoutOptions,
) -> Result<Document> {
    Pipeline::new(options).run(source)
}

/// Convert a document to JSON (the block model).
///
/// # Example
///
/// ```
/// use relayout::{to_json, JsonFormat, MemorySource};
///
/// let json = to_json(&MemorySource::default(), JsonFormat::Compact).unwrap();
/// assert_eq!(json, r#"{"blocks":[],"page_count":0}"#);
/// ```
pub fn to_json<S: PageSource + ?Sized>(source: &S, format: JsonFormat) -> Result<String> {
    let doc = convert(source)?;
    render::to_json(&doc, format)
}

/// Builder for converting documents.
///
/// # Example
///
/// ```no_run
/// use relayout::{Relayout, TokenDump};
///
/// let dump = TokenDump::open("paper.tokens.json")?;
/// let markdown = Relayout::new()
///     .without_table_of_contents()
///     .sequential()
///     .convert(&dump)?
///     .to_markdown();
/// # Ok::<(), relayout::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Relayout {
    options: LayoutOptions,
    progress: Option<Sender<Progress>>,
}

impl Relayout {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all options.
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Set heading thresholds.
    pub fn with_headings(mut self, headings: HeadingThresholds) -> Self {
        self.options = self.options.with_headings(headings);
        self
    }

    /// Do not prepend a table of contents.
    pub fn without_table_of_contents(mut self) -> Self {
        self.options = self.options.with_table_of_contents(false);
        self
    }

    /// Disable the `Article` front-matter merge.
    pub fn without_front_matter_merge(mut self) -> Self {
        self.options = self.options.with_front_matter_merge(false);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Report progress on a channel.
    pub fn with_progress(mut self, sender: Sender<Progress>) -> Self {
        self.progress = Some(sender);
        self
    }

    /// Run the conversion.
    pub fn convert<S: PageSource + ?Sized>(self, source: &S) -> Result<RelayoutResult> {
        let mut pipeline = Pipeline::new(self.options);
        if let Some(sender) = self.progress {
            pipeline = pipeline.with_progress(sender);
        }
        let document = pipeline.run(source)?;
        Ok(RelayoutResult { document })
    }
}

/// Result of a conversion.
#[derive(Debug, Clone)]
pub struct RelayoutResult {
    /// The reconstructed document
    pub document: Document,
}

impl RelayoutResult {
    /// Render as Markdown.
    pub fn to_markdown(&self) -> String {
        render::render_markdown(&self.document)
    }

    /// Render as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Statistics about the reconstructed document.
    pub fn stats(&self) -> ConversionStats {
        ConversionStats::from_document(&self.document)
    }

    /// Plain text without Markdown markup.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relayout_builder() {
        let builder = Relayout::new()
            .without_table_of_contents()
            .without_front_matter_merge()
            .sequential();

        assert!(!builder.options.table_of_contents);
        assert!(!builder.options.front_matter_merge);
        assert!(!builder.options.parallel);
        assert!(builder.progress.is_none());
    }

    #[test]
    fn test_relayout_builder_default() {
        let builder = Relayout::default();
        assert_eq!(builder.options, LayoutOptions::default());
    }

    #[test]
    fn test_convert_without_toc() {
        let source = MemorySource::new(vec![vec![
            Token::new("Results", 72.0, 700.0, 22.0),
            Token::new("It works.", 72.0, 680.0, 10.0),
        ]]);
        let result = Relayout::new()
            .without_table_of_contents()
            .convert(&source)
            .unwrap();
        assert_eq!(result.to_markdown(), "## Results\n\nIt works.\n");
        assert_eq!(result.stats().heading_count, 1);
        assert_eq!(result.plain_text(), "Results\nIt works.");
    }

    #[test]
    fn test_extraction_error_propagates() {
        let source = FnSource::new(1, |_| Err(Error::Other("no text layer".into())));
        assert!(matches!(
            to_markdown(&source),
            Err(Error::Extraction { page: 1, .. })
        ));
    }

    #[test]
    fn test_empty_document_markdown() {
        assert_eq!(to_markdown(&MemorySource::default()).unwrap(), "");
    }
}
