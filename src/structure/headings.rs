//! Heading promotion rules that look beyond a single line's height.

use std::sync::LazyLock;

use regex::Regex;

use super::Draft;
use crate::model::Block;

static RE_UNDERLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[=_-]{3,}$").unwrap());

const BULLET_GLYPHS: &[char] = &['•', '●', '○', '◦', '▪', '▫', '-', '*'];

/// Promote a line followed by `===`, `---` or `___` to a level 2 heading.
/// The underline itself is consumed.
pub(crate) fn promote_underlined(drafts: Vec<Draft>) -> Vec<Draft> {
    let mut out: Vec<Draft> = Vec::with_capacity(drafts.len());

    for draft in drafts {
        if is_underline(&draft.block) {
            if let Some(prev) = out.last_mut() {
                if let Some(text) = underlinable_text(&prev.block) {
                    log::trace!("Underlined heading: {:?}", text);
                    prev.block = Block::heading(2, text);
                    continue;
                }
            }
        }
        out.push(draft);
    }
    out
}

fn is_underline(block: &Block) -> bool {
    matches!(block, Block::Paragraph { text } if RE_UNDERLINE.is_match(text))
}

fn underlinable_text(block: &Block) -> Option<String> {
    match block {
        Block::Paragraph { text } | Block::Emphasis { text } => {
            let len = text.chars().count();
            (len > 3 && len < 100 && !RE_UNDERLINE.is_match(text)).then(|| text.clone())
        }
        _ => None,
    }
}

/// Promote paragraphs set entirely in capitals to level 3 headings.
pub(crate) fn promote_all_caps(mut drafts: Vec<Draft>) -> Vec<Draft> {
    for draft in &mut drafts {
        if let Block::Paragraph { text } = &draft.block {
            if is_all_caps_heading(text) {
                log::trace!("All-caps heading: {:?}", text);
                draft.block = Block::heading(3, text.clone());
            }
        }
    }
    drafts
}

/// 2-10 words, no lowercase letters, 11-99 chars, not starting with a digit
/// or bullet glyph, and not opening with a short acronym.
pub fn is_all_caps_heading(text: &str) -> bool {
    let len = text.chars().count();
    if len <= 10 || len >= 100 {
        return false;
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < 2 || words.len() > 10 {
        return false;
    }

    match text.chars().next() {
        Some(c) if c.is_ascii_digit() || BULLET_GLYPHS.contains(&c) => return false,
        None => return false,
        _ => {}
    }

    if !text.chars().any(char::is_alphabetic) || text.chars().any(char::is_lowercase) {
        return false;
    }

    !is_acronym(words[0])
}

fn is_acronym(word: &str) -> bool {
    let len = word.chars().count();
    (2..=6).contains(&len) && word.chars().all(char::is_alphabetic)
}

/// Collapse an `"Article"` / title / subtitle opening into one heading.
///
/// Only fires when the first three blocks are plain text and the first reads
/// exactly `Article`.
pub fn merge_front_matter(mut blocks: Vec<Block>) -> Vec<Block> {
    if blocks.len() < 3 {
        return blocks;
    }

    let texts: Vec<Option<&str>> = blocks[..3].iter().map(front_matter_text).collect();
    let (Some(first), Some(second), Some(third)) = (texts[0], texts[1], texts[2]) else {
        return blocks;
    };
    if first.trim() != "Article" {
        return blocks;
    }

    let title = format!("{} {}", second.trim(), third.trim());
    log::debug!("Front matter merged into title {:?}", title);
    blocks.splice(0..3, [Block::heading(1, title)]);
    blocks
}

fn front_matter_text(block: &Block) -> Option<&str> {
    match block {
        Block::Heading { text, .. } | Block::Paragraph { text } | Block::Emphasis { text } => {
            Some(text)
        }
        _ => None,
    }
}
