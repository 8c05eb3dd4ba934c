//! Line text: classification, cleanup and link extraction.

mod classify;
mod links;
mod normalize;

pub use classify::{
    CitationResidue, Classifier, HeadingByHeight, LineKind, LineRule, MetadataLine,
};
pub use links::{extract_links, Extracted};
pub use normalize::{
    collapse_whitespace, is_boilerplate, is_citation_residue, join_hyphenated, normalize_line,
    strip_citation_prefix,
};
