//! Line-level text cleanup.

use std::sync::LazyLock;

use regex::Regex;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static RE_BOILERPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Nature\s*\|\s*Vol|(?:Extended Data )?Fig\.|Supplementary (?:Fig|Table))")
        .unwrap()
});

static RE_CITATION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d{1,2}[, ]\s*)+").unwrap());

static RE_CITATION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}(?:,\d{1,2})*,?$").unwrap());

static RE_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\b",
    )
    .unwrap()
});

static RE_SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,.;:!?)])").unwrap());

static RE_SPACE_AFTER_PAREN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(\s+").unwrap());

/// Lines shorter than this (in chars) are discarded.
const MIN_LINE_CHARS: usize = 2;

/// Clean one line of text.
///
/// Collapses whitespace, drops running headers and figure captions, strips
/// clusters of bare citation numbers, tightens spacing around punctuation
/// and discards fragments shorter than two characters. The steps repeat until
/// the text stops changing, so normalizing an already normalized line
/// returns it unchanged.
pub fn normalize_line(text: &str) -> Option<String> {
    let mut current = text.to_string();
    loop {
        let next = normalize_once(&current)?;
        if next == current {
            return Some(next);
        }
        current = next;
    }
}

fn normalize_once(text: &str) -> Option<String> {
    let collapsed = collapse_whitespace(text);
    if is_boilerplate(&collapsed) {
        return None;
    }

    let stripped = strip_citation_cluster(&collapsed);
    let spaced = fix_punctuation_spacing(&stripped);

    if is_boilerplate(&spaced) || spaced.chars().count() < MIN_LINE_CHARS {
        return None;
    }
    Some(spaced)
}

/// Trim and collapse every whitespace run to one space.
pub fn collapse_whitespace(text: &str) -> String {
    RE_WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Running headers and captions that carry no body text.
pub fn is_boilerplate(text: &str) -> bool {
    RE_BOILERPLATE.is_match(text.trim_start())
}

/// Remove a leading run of citation numbers such as `12, 13 ` or `4 `.
pub fn strip_citation_prefix(text: &str) -> &str {
    match RE_CITATION_PREFIX.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Check whether nothing but digits, commas and whitespace remains.
pub fn is_citation_residue(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_ascii_digit() || c == ',' || c.is_whitespace())
}

/// Strip standalone 1-2 digit tokens when a line holds three or more of them
/// and no month name (which would make them part of a date).
fn strip_citation_cluster(text: &str) -> String {
    if RE_MONTH.is_match(text) {
        return text.to_string();
    }

    let numbers: usize = text
        .split(' ')
        .filter(|w| RE_CITATION_TOKEN.is_match(w))
        .map(|w| w.split(',').filter(|n| !n.is_empty()).count())
        .sum();

    if numbers < 3 {
        return text.to_string();
    }

    text.split(' ')
        .filter(|w| !RE_CITATION_TOKEN.is_match(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn fix_punctuation_spacing(text: &str) -> String {
    let text = RE_SPACE_BEFORE_PUNCT.replace_all(text, "$1");
    RE_SPACE_AFTER_PAREN.replace_all(&text, "(").into_owned()
}

/// Join two lines split by a hyphen at the line break.
///
/// Returns the joined text, hyphen removed, when `first` ends in a hyphen and
/// `second` starts with a lowercase letter.
pub fn join_hyphenated(first: &str, second: &str) -> Option<String> {
    let stem = first.strip_suffix('-')?;
    if !second.chars().next().is_some_and(char::is_lowercase) {
        return None;
    }
    Some(format!("{stem}{second}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(
            normalize_line("  Hello \t  world  ").as_deref(),
            Some("Hello world")
        );
    }

    #[test]
    fn test_boilerplate_dropped() {
        assert_eq!(normalize_line("Nature | Vol 600 | 2 December 2021"), None);
        assert_eq!(normalize_line("Fig. 3 | Overview of the method."), None);
        assert_eq!(normalize_line("Extended Data Fig. 1 | Details"), None);
        assert_eq!(normalize_line("Supplementary Table 2"), None);
        assert!(normalize_line("Figure captions are kept").is_some());
    }

    #[test]
    fn test_citation_cluster_stripped() {
        assert_eq!(
            normalize_line("as shown previously 12 14 18,19 in mice").as_deref(),
            Some("as shown previously in mice")
        );
    }

    #[test]
    fn test_citation_cluster_kept_for_dates() {
        assert_eq!(
            normalize_line("Published 1 June 2021 pages 3 4 5").as_deref(),
            Some("Published 1 June 2021 pages 3 4 5")
        );
    }

    #[test]
    fn test_two_numbers_kept() {
        assert_eq!(
            normalize_line("between 3 and 4 cells").as_deref(),
            Some("between 3 and 4 cells")
        );
    }

    #[test]
    fn test_punctuation_spacing() {
        assert_eq!(
            normalize_line("cells ( n = 4 ) were used , then ; done .").as_deref(),
            Some("cells (n = 4) were used, then; done.")
        );
    }

    #[test]
    fn test_short_lines_discarded() {
        assert_eq!(normalize_line("a"), None);
        assert_eq!(normalize_line("   "), None);
        assert_eq!(normalize_line("ab").as_deref(), Some("ab"));
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "  Hello \t  world  ",
            "x 1 2 ,3 y",
            "cells ( n = 4 ) were used , then",
            "text 1, 2, 3, 4 more text",
            "Results 7 ( 8 ) 9 .",
        ];
        for input in inputs {
            if let Some(once) = normalize_line(input) {
                assert_eq!(normalize_line(&once).as_deref(), Some(once.as_str()));
            }
        }
    }

    #[test]
    fn test_citation_prefix() {
        assert_eq!(strip_citation_prefix("12, 13 Smith et al."), "Smith et al.");
        assert_eq!(strip_citation_prefix("1. Introduction"), "1. Introduction");
        assert!(is_citation_residue(strip_citation_prefix("4, 5, 6")));
        assert!(!is_citation_residue("4 cells"));
    }

    #[test]
    fn test_join_hyphenated() {
        assert_eq!(
            join_hyphenated("the experi-", "ment worked").as_deref(),
            Some("the experiment worked")
        );
        assert_eq!(join_hyphenated("the experi-", "Ment"), None);
        assert_eq!(
            join_hyphenated("range 3-", "five").as_deref(),
            Some("range 3five")
        );
        assert_eq!(join_hyphenated("no hyphen", "here"), None);
    }
}
