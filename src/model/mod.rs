//! Intermediate representations passed between pipeline stages.
//!
//! Data flows strictly downstream: [`Token`]s are grouped into [`Line`]s,
//! lines are classified into [`Block`]s, and blocks are assembled into a
//! [`Document`]. Each stage takes its input by value or by shared reference
//! and returns a new representation.

mod block;
mod document;
mod line;
mod token;

pub use block::{Block, TableBlock, TocEntry};
pub use document::Document;
pub use line::{ColumnBucket, Line};
pub use token::Token;
