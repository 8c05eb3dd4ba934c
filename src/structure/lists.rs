//! List item detection.

use std::sync::LazyLock;

use regex::Regex;

use super::Draft;
use crate::model::Block;
use crate::text::{collapse_whitespace, normalize_line};

static RE_LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\s*)(?:[•●○◦▪▫-]|\d+[.)]|[a-z][.)])\s+(\S.*)$").unwrap()
});

/// Turn bulleted, numbered and lettered paragraph lines into list items.
///
/// Depth is half the leading whitespace of the raw line. A following line
/// indented by at least two spaces that carries no marker of its own is
/// appended to the item as its wrapped continuation.
pub(crate) fn format_lists(drafts: Vec<Draft>) -> Vec<Draft> {
    let mut out: Vec<Draft> = Vec::with_capacity(drafts.len());
    let mut in_list = false;

    for draft in drafts {
        if !draft.block.is_paragraph() {
            in_list = false;
            out.push(draft);
            continue;
        }

        if let Some(item) = list_item(&draft.raw) {
            out.push(Draft::new(item, draft.raw));
            in_list = true;
            continue;
        }

        if in_list && leading_whitespace(&draft.raw) >= 2 {
            if let (Some(Block::ListItem { text, .. }), Some(continuation)) =
                (out.last_mut().map(|d| &mut d.block), draft.block.text())
            {
                text.push(' ');
                text.push_str(continuation);
                continue;
            }
        }

        in_list = false;
        out.push(draft);
    }
    out
}

/// Parse a raw line as a list item.
pub fn list_item(raw: &str) -> Option<Block> {
    let caps = RE_LIST_ITEM.captures(raw)?;
    let indent = caps.get(1).map_or(0, |m| m.as_str().chars().count());
    let body = caps.get(2)?.as_str();
    let text = normalize_line(body).unwrap_or_else(|| collapse_whitespace(body));

    Some(Block::ListItem {
        depth: indent / 2,
        text,
    })
}

fn leading_whitespace(raw: &str) -> usize {
    raw.chars().take_while(|c| c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(raw: &str) -> Draft {
        Draft::new(Block::paragraph(collapse_whitespace(raw)), raw)
    }

    fn item(depth: usize, text: &str) -> Block {
        Block::ListItem {
            depth,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_bullets() {
        let drafts = format_lists(vec![para("•  Item one"), para("-  Item two")]);
        let blocks: Vec<_> = drafts.into_iter().map(|d| d.block).collect();
        assert_eq!(blocks, vec![item(0, "Item one"), item(0, "Item two")]);
    }

    #[test]
    fn test_numbered_and_lettered() {
        assert_eq!(list_item("1. First"), Some(item(0, "First")));
        assert_eq!(list_item("12) Twelfth"), Some(item(0, "Twelfth")));
        assert_eq!(list_item("    b) Nested"), Some(item(2, "Nested")));
        assert_eq!(list_item("C. Upper letter"), Some(item(0, "Upper letter")));
        assert_eq!(list_item("Plain sentence."), None);
        assert_eq!(list_item("-----"), None);
    }

    #[test]
    fn test_continuation() {
        let drafts = format_lists(vec![
            para("• First item that"),
            para("   wraps onto a second line"),
            para("Not indented"),
        ]);
        let blocks: Vec<_> = drafts.into_iter().map(|d| d.block).collect();
        assert_eq!(
            blocks,
            vec![
                item(0, "First item that wraps onto a second line"),
                Block::paragraph("Not indented"),
            ]
        );
    }

    #[test]
    fn test_indented_line_without_list_is_paragraph() {
        let drafts = format_lists(vec![para("  indented text")]);
        assert!(drafts[0].block.is_paragraph());
    }

    #[test]
    fn test_headings_end_list() {
        let drafts = format_lists(vec![
            para("• one"),
            Draft::new(Block::heading(2, "Next"), "Next"),
            para("   indented"),
        ]);
        assert!(drafts[2].block.is_paragraph());
    }
}
