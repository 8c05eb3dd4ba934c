//! Rendering module for converting documents to output formats.

mod json;
mod markdown;
mod stats;

pub use json::{to_json, JsonFormat};
pub use markdown::{render_block, render_markdown};
pub use stats::ConversionStats;
