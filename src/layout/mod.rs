//! Page geometry: column segmentation and line building.
//!
//! Column assignment is decided once per page from the x-origins of all its
//! tokens; lines are then built per column bucket so that text from the two
//! halves of a two-column page never ends up on the same line.

mod columns;
mod lines;

pub use columns::detect_split;
pub use lines::LineBuilder;
