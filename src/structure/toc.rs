//! Table of contents generation.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Block, TocEntry};

static RE_WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static RE_NON_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\-]").unwrap());

/// GitHub-style anchor slug for a heading.
///
/// ```
/// assert_eq!(relayout::slugify("Results & Discussion"), "results--discussion");
/// ```
pub fn slugify(title: &str) -> String {
    let lower = title.trim().to_lowercase();
    let hyphenated = RE_WHITESPACE_RUN.replace_all(&lower, "-");
    RE_NON_SLUG.replace_all(&hyphenated, "").into_owned()
}

/// Short words that are title-cased rather than kept as acronyms.
const COMMON_WORDS: &[&str] = &[
    "ALL", "AN", "AND", "ARE", "AS", "AT", "BUT", "BY", "FOR", "HOW", "IN", "IS", "ITS", "NEW",
    "NOT", "OF", "ON", "ONE", "OR", "OUR", "THE", "TO", "TWO", "USE", "VIA", "WHY",
];

/// Display title for a table of contents entry.
///
/// Headings set entirely in capitals are listed in title case, except for
/// 2-3 letter words that are not common English words: those are taken to
/// be acronyms and kept (`DNA REPAIR` lists as `DNA Repair`).
pub fn display_title(title: &str) -> String {
    let title = title.trim();
    let shouting =
        title.chars().any(char::is_alphabetic) && !title.chars().any(char::is_lowercase);
    if !shouting {
        return title.to_string();
    }

    title
        .split(' ')
        .map(|word| {
            if is_acronym(word) {
                return word.to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn is_acronym(word: &str) -> bool {
    let letters = word.chars().filter(|c| c.is_alphabetic()).count();
    (2..=3).contains(&letters) && !COMMON_WORDS.contains(&word)
}

/// Prepend a table of contents and a horizontal rule.
///
/// Lists every heading of level 1-3 in document order. A document without
/// headings is returned unchanged.
pub fn insert_table_of_contents(blocks: Vec<Block>) -> Vec<Block> {
    let entries: Vec<TocEntry> = blocks
        .iter()
        .filter_map(|b| match b {
            Block::Heading { level, text } if (1..=3).contains(level) => Some(TocEntry {
                level: *level,
                title: display_title(text),
                slug: slugify(text),
            }),
            _ => None,
        })
        .collect();

    if entries.is_empty() {
        return blocks;
    }

    log::debug!("Table of contents with {} entries", entries.len());

    let mut out = Vec::with_capacity(blocks.len() + 2);
    out.push(Block::TableOfContents { entries });
    out.push(Block::Rule);
    out.extend(blocks);
    out
}
