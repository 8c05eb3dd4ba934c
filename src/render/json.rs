//! JSON output of the block model.
//!
//! The document serializes as `{"blocks": [...], "page_count": N}`. Each
//! block is an object tagged by `"type"` (`heading`, `paragraph`, `emphasis`,
//! `list_item`, `table`, `link`, `reference_entry`, `table_of_contents`,
//! `rule`, `page_break`) carrying that variant's fields, so consumers can
//! rebuild the structure without parsing Markdown.

use crate::error::{Error, Result};
use crate::model::Document;

/// Layout of the emitted JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Indented, one field per line
    #[default]
    Pretty,
    /// Single line
    Compact,
}

/// Serialize a reconstructed document's blocks.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };
    json.map_err(|e| Error::Render(format!("cannot serialize {} blocks: {e}", doc.blocks.len())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, TableBlock};

    #[test]
    fn test_blocks_are_tagged() {
        let doc = Document::from_blocks(
            vec![
                Block::heading(1, "Title"),
                Block::Table(TableBlock::new(vec![vec!["a".into(), "b".into()]])),
                Block::PageBreak,
            ],
            2,
        );

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["page_count"], 2);
        assert_eq!(value["blocks"][0]["type"], "heading");
        assert_eq!(value["blocks"][0]["level"], 1);
        assert_eq!(value["blocks"][1]["type"], "table");
        assert_eq!(value["blocks"][1]["rows"][0][1], "b");
        assert_eq!(value["blocks"][2]["type"], "page_break");
    }

    #[test]
    fn test_compact_reads_back() {
        let doc = Document::from_blocks(vec![Block::PageBreak, Block::link("https://a.org")], 2);

        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
