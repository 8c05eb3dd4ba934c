//! Page sources: where positioned tokens come from.
//!
//! The engine never parses a document format itself. Anything that can report
//! a page count and hand back the text runs of one page implements
//! [`PageSource`]; the conversion pipeline pulls pages through it one at a
//! time, in order.

mod json;

pub use json::TokenDump;

use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::Token;

/// Abstract interface for token extraction.
///
/// Implementations provide the page count and per-page token lists without
/// exposing any concrete extraction library types.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Extract the tokens of one page (0-indexed).
    fn extract_page(&self, index: usize) -> Result<Vec<Token>>;
}

impl<S: PageSource + ?Sized> PageSource for &S {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn extract_page(&self, index: usize) -> Result<Vec<Token>> {
        (**self).extract_page(index)
    }
}

impl<S: PageSource + ?Sized> PageSource for Box<S> {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn extract_page(&self, index: usize) -> Result<Vec<Token>> {
        (**self).extract_page(index)
    }
}

/// Pages held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySource {
    pages: Vec<Vec<Token>>,
}

impl MemorySource {
    /// Create a source from per-page token lists.
    pub fn new(pages: Vec<Vec<Token>>) -> Self {
        Self { pages }
    }

    /// Append a page.
    pub fn push_page(&mut self, tokens: Vec<Token>) {
        self.pages.push(tokens);
    }

    /// Borrow the stored pages.
    pub fn pages(&self) -> &[Vec<Token>] {
        &self.pages
    }
}

impl From<Vec<Vec<Token>>> for MemorySource {
    fn from(pages: Vec<Vec<Token>>) -> Self {
        Self::new(pages)
    }
}

impl PageSource for MemorySource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn extract_page(&self, index: usize) -> Result<Vec<Token>> {
        self.pages
            .get(index)
            .cloned()
            .ok_or(Error::PageOutOfRange(index, self.pages.len()))
    }
}

/// A source backed by a caller-supplied extraction closure.
///
/// ```
/// use relayout::{FnSource, PageSource, Token};
///
/// let source = FnSource::new(2, |index| {
///     Ok(vec![Token::new(format!("page {}", index + 1), 50.0, 700.0, 10.0)])
/// });
/// assert_eq!(source.page_count(), 2);
/// ```
pub struct FnSource<F> {
    page_count: usize,
    extract: F,
}

impl<F> FnSource<F>
where
    F: Fn(usize) -> Result<Vec<Token>>,
{
    /// Create a source from a page count and an extraction closure.
    pub fn new(page_count: usize, extract: F) -> Self {
        Self {
            page_count,
            extract,
        }
    }
}

impl<F> std::fmt::Debug for FnSource<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSource")
            .field("page_count", &self.page_count)
            .finish_non_exhaustive()
    }
}

impl<F> PageSource for FnSource<F>
where
    F: Fn(usize) -> Result<Vec<Token>>,
{
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn extract_page(&self, index: usize) -> Result<Vec<Token>> {
        if index >= self.page_count {
            return Err(Error::PageOutOfRange(index, self.page_count));
        }
        (self.extract)(index)
    }
}

const LIGATURES: &[(char, &str)] = &[
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    ('\u{FB05}', "st"),
    ('\u{FB06}', "st"),
];

/// Bring raw extraction output into canonical form.
///
/// Run text is NFC-normalized with typographic ligatures expanded. Runs that
/// are whitespace-only or carry non-finite coordinates are dropped.
pub fn canonicalize(page: usize, tokens: Vec<Token>) -> Vec<Token> {
    let total = tokens.len();
    let kept: Vec<Token> = tokens
        .into_iter()
        .filter(|t| t.has_finite_geometry() && !t.is_blank())
        .map(|mut t| {
            t.text = normalize_run(&t.text);
            t
        })
        .collect();

    if kept.len() < total {
        log::warn!(
            "page {}: dropped {} blank or malformed token(s)",
            page + 1,
            total - kept.len()
        );
    }
    kept
}

fn normalize_run(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfc() {
        match LIGATURES.iter().find(|(lig, _)| *lig == c) {
            Some((_, replacement)) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    out
}
