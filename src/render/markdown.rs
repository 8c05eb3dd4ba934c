//! Markdown rendering.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Block, Document, TableBlock, TocEntry};

static RE_BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Render a document to Markdown.
///
/// Blocks are separated by a blank line, except consecutive list items and
/// consecutive reference entries which sit on adjacent lines. The result has
/// no trailing whitespace on any line and ends with exactly one newline
/// (an empty document renders as the empty string).
pub fn render_markdown(doc: &Document) -> String {
    let mut output = String::new();
    let mut previous: Option<&Block> = None;

    for block in &doc.blocks {
        if let Some(prev) = previous {
            output.push_str(separator(prev, block));
        }
        render_block(&mut output, block);
        previous = Some(block);
    }

    tidy(&output)
}

fn separator(prev: &Block, next: &Block) -> &'static str {
    match (prev, next) {
        (Block::ListItem { .. }, Block::ListItem { .. })
        | (Block::ReferenceEntry { .. }, Block::ReferenceEntry { .. }) => "\n",
        _ => "\n\n",
    }
}

/// Render a single block without a trailing newline.
pub fn render_block(output: &mut String, block: &Block) {
    match block {
        Block::Heading { level, text } => {
            for _ in 0..*level {
                output.push('#');
            }
            output.push(' ');
            output.push_str(text);
        }
        Block::Paragraph { text } => output.push_str(text),
        Block::Emphasis { text } => {
            output.push('*');
            output.push_str(text);
            output.push('*');
        }
        Block::ListItem { depth, text } => {
            output.push_str(&"  ".repeat(*depth));
            output.push_str("- ");
            output.push_str(text);
        }
        Block::Table(table) => render_table(output, table),
        Block::Link { url } => {
            output.push_str(&format!("[{url}]({url})"));
        }
        Block::ReferenceEntry { number, text } => {
            output.push_str(&format!("{number}. {text}"));
        }
        Block::TableOfContents { entries } => render_toc(output, entries),
        Block::Rule | Block::PageBreak => output.push_str("---"),
    }
}

fn render_table(output: &mut String, table: &TableBlock) {
    let columns = table.column_count();
    if columns == 0 {
        return;
    }

    output.push('|');
    for _ in 0..columns {
        output.push_str("   |");
    }
    output.push('\n');

    output.push('|');
    for _ in 0..columns {
        output.push_str(" --- |");
    }

    for row in &table.rows {
        output.push_str("\n|");
        for i in 0..columns {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            output.push(' ');
            output.push_str(&cell.replace('|', "\\|"));
            output.push_str(" |");
        }
    }
}

fn render_toc(output: &mut String, entries: &[TocEntry]) {
    output.push_str("## Table of Contents\n");
    for entry in entries {
        output.push('\n');
        output.push_str(&"  ".repeat(entry.level.saturating_sub(1) as usize));
        output.push_str(&format!("- [{}](#{})", entry.title, entry.slug));
    }
}

/// Strip trailing whitespace and blank-line runs; end with one newline.
fn tidy(output: &str) -> String {
    let trimmed: Vec<&str> = output.lines().map(str::trim_end).collect();
    let joined = trimmed.join("\n");
    let collapsed = RE_BLANK_RUN.replace_all(joined.trim_matches('\n'), "\n\n");
    if collapsed.is_empty() {
        return String::new();
    }
    format!("{collapsed}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(blocks: Vec<Block>) -> String {
        render_markdown(&Document::from_blocks(blocks, 1))
    }

    #[test]
    fn test_headings() {
        assert_eq!(render(vec![Block::heading(1, "Title")]), "# Title\n");
        assert_eq!(render(vec![Block::heading(2, "Section")]), "## Section\n");
        assert_eq!(render(vec![Block::heading(3, "Sub")]), "### Sub\n");
    }

    #[test]
    fn test_block_separation() {
        let md = render(vec![
            Block::paragraph("One."),
            Block::ListItem {
                depth: 0,
                text: "a".into(),
            },
            Block::ListItem {
                depth: 1,
                text: "b".into(),
            },
            Block::emphasis("Received 2020"),
            Block::PageBreak,
            Block::link("https://a.org"),
        ]);
        assert_eq!(
            md,
            "One.\n\n- a\n  - b\n\n*Received 2020*\n\n---\n\n[https://a.org](https://a.org)\n"
        );
    }

    #[test]
    fn test_table() {
        let md = render(vec![Block::Table(TableBlock::new(vec![
            vec!["a".into(), "b".into(), "c".into()],
            vec!["d".into()],
            vec!["x|y".into(), "e".into(), "f".into()],
        ]))]);
        assert_eq!(
            md,
            "|   |   |   |\n| --- | --- | --- |\n| a | b | c |\n| d |  |  |\n| x\\|y | e | f |\n"
        );
    }

    #[test]
    fn test_toc_and_references() {
        let md = render(vec![
            Block::TableOfContents {
                entries: vec![
                    TocEntry {
                        level: 1,
                        title: "Abstract".into(),
                        slug: "abstract".into(),
                    },
                    TocEntry {
                        level: 2,
                        title: "Results & Discussion".into(),
                        slug: "results--discussion".into(),
                    },
                ],
            },
            Block::Rule,
            Block::ReferenceEntry {
                number: 1,
                text: "First.".into(),
            },
            Block::ReferenceEntry {
                number: 2,
                text: "Second.".into(),
            },
        ]);
        assert_eq!(
            md,
            "## Table of Contents\n\n- [Abstract](#abstract)\n  - [Results & Discussion](#results--discussion)\n\n---\n\n1. First.\n2. Second.\n"
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(render(vec![]), "");
    }
}
