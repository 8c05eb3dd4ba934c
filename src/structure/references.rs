//! Reference section numbering.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::Block;

static RE_REFERENCES_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:references|bibliography|works cited)\b").unwrap());

static RE_EXISTING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[?\d+\]?[.)]?\s+").unwrap());

/// Number the entries of the reference section.
///
/// Everything after the first references heading that carries text becomes a
/// [`Block::ReferenceEntry`] numbered from 1, with any original numbering
/// removed. Links, page breaks and later headings pass through unchanged.
/// Without a references heading the blocks are returned as they are.
pub fn format_references(blocks: Vec<Block>) -> Vec<Block> {
    let Some(start) = blocks.iter().position(is_references_heading) else {
        return blocks;
    };

    let mut number = 0;
    let formatted: Vec<Block> = blocks
        .into_iter()
        .enumerate()
        .map(|(i, block)| {
            if i <= start {
                return block;
            }
            match block {
                Block::Paragraph { text }
                | Block::Emphasis { text }
                | Block::ListItem { text, .. }
                | Block::ReferenceEntry { text, .. } => {
                    number += 1;
                    Block::ReferenceEntry {
                        number,
                        text: strip_number(&text),
                    }
                }
                other => other,
            }
        })
        .collect();

    log::debug!("Numbered {} reference entries", number);
    formatted
}

fn is_references_heading(block: &Block) -> bool {
    matches!(block, Block::Heading { level, text } if *level <= 3 && RE_REFERENCES_HEADING.is_match(text))
}

fn strip_number(text: &str) -> String {
    RE_EXISTING_NUMBER.replace(text, "").into_owned()
}
