//! Soft-wrap repair: hyphenation joins and paragraph merging.

use std::sync::LazyLock;

use regex::Regex;

use super::Draft;
use crate::model::Block;
use crate::text::join_hyphenated;

static RE_AUTHOR_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+ [A-Z][a-z]+,").unwrap());

static RE_DATE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:\d{1,2}\s+)?(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\.?\s+(?:\d{1,2},?\s+)?\d{4}\b",
    )
    .unwrap()
});

const TERMINALS: &[char] = &['.', '!', '?', ';', ':'];

/// Join lines split across a line break.
///
/// A line ending in a hyphen is joined to a following lowercase line without
/// the hyphen. Otherwise a plain paragraph that does not end a sentence
/// absorbs the next paragraph when that one starts lowercase and is not an
/// author-name line following ordinary text.
pub(crate) fn merge_paragraphs(drafts: Vec<Draft>) -> Vec<Draft> {
    let mut out: Vec<Draft> = Vec::with_capacity(drafts.len());

    for draft in drafts {
        let Some(prev) = out.last_mut() else {
            out.push(draft);
            continue;
        };

        let (Block::Paragraph { text: cur }, Some(prev_text)) = (&draft.block, prev.block.text())
        else {
            out.push(draft);
            continue;
        };

        let joinable_prev = matches!(prev.block, Block::Paragraph { .. } | Block::Emphasis { .. });
        if joinable_prev {
            if let Some(joined) = join_hyphenated(prev_text, cur) {
                set_text(&mut prev.block, joined);
                continue;
            }
        }

        if should_merge(&prev.block, cur) {
            let merged = format!("{prev_text} {cur}");
            set_text(&mut prev.block, merged);
            continue;
        }

        out.push(draft);
    }
    out
}

fn set_text(block: &mut Block, value: String) {
    if let Some(text) = block.text_mut() {
        *text = value;
    }
}

fn should_merge(prev: &Block, cur: &str) -> bool {
    let Block::Paragraph { text: prev } = prev else {
        return false;
    };
    if prev.ends_with(TERMINALS) || is_date_line(prev) {
        return false;
    }
    if !cur.chars().next().is_some_and(char::is_lowercase) {
        return false;
    }
    !is_author_line(cur) || is_author_line(prev)
}

/// `Firstname Lastname,` at the start of a line.
pub fn is_author_line(text: &str) -> bool {
    RE_AUTHOR_LINE.is_match(text)
}

fn is_date_line(text: &str) -> bool {
    RE_DATE_LINE.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(text: &str) -> Draft {
        Draft::new(Block::paragraph(text), text)
    }

    fn blocks(drafts: Vec<Draft>) -> Vec<Block> {
        drafts.into_iter().map(|d| d.block).collect()
    }

    #[test]
    fn test_lowercase_continuation_merged() {
        let out = merge_paragraphs(vec![
            para("The cells were grown"),
            para("in standard medium."),
            para("Next sentence"),
        ]);
        assert_eq!(
            blocks(out),
            vec![
                Block::paragraph("The cells were grown in standard medium."),
                Block::paragraph("Next sentence"),
            ]
        );
    }

    #[test]
    fn test_terminal_punctuation_stops_merge() {
        let out = merge_paragraphs(vec![para("Done here:"), para("then more")]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_hyphenation_joined() {
        let out = merge_paragraphs(vec![para("a careful experi-"), para("ment was run.")]);
        assert_eq!(
            blocks(out),
            vec![Block::paragraph("a careful experiment was run.")]
        );

        let out = merge_paragraphs(vec![para("values in the range 3-"), para("five were kept")]);
        assert_eq!(
            blocks(out),
            vec![Block::paragraph("values in the range 3five were kept")]
        );
    }

    #[test]
    fn test_author_lines() {
        let out = merge_paragraphs(vec![
            para("Jane Smith, John Doe,"),
            para("Alice Brown, Bob White"),
        ]);
        assert_eq!(out.len(), 2);

        let out = merge_paragraphs(vec![para("We thank"), para("Alice Brown, for help")]);
        assert_eq!(out.len(), 2);

        let out = merge_paragraphs(vec![para("Jane Smith, John Doe,"), para("and colleagues")]);
        assert_eq!(
            blocks(out),
            vec![Block::paragraph("Jane Smith, John Doe, and colleagues")]
        );
    }

    #[test]
    fn test_headings_and_emphasis_not_merged() {
        let out = merge_paragraphs(vec![
            Draft::new(Block::heading(2, "Methods"), "Methods"),
            para("lowercase start"),
        ]);
        assert_eq!(out.len(), 2);

        let out = merge_paragraphs(vec![
            Draft::new(Block::emphasis("Received 1 May 2021"), ""),
            para("and accepted later"),
        ]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_date_line_not_merged() {
        let out = merge_paragraphs(vec![para("12 March 2021"), para("revised online")]);
        assert_eq!(out.len(), 2);
    }
}
