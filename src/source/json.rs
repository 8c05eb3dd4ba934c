//! JSON token dumps.
//!
//! Accepted shapes:
//!
//! ```json
//! {"pages": [[{"text": "Title", "x": 72.0, "y": 700.0, "height": 28.0}]]}
//! ```
//!
//! or the bare array of pages `[[{...}, ...], ...]`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::PageSource;
use crate::error::{Error, Result};
use crate::model::Token;

/// A document stored as a JSON token dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenDump {
    /// Tokens per page
    pub pages: Vec<Vec<Token>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DumpShape {
    // Tried first: a struct variant also accepts a sequence.
    Bare(Vec<Vec<Token>>),
    Wrapped { pages: Vec<Vec<Token>> },
}

impl TokenDump {
    /// Parse a token dump from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let shape: DumpShape = serde_json::from_str(json)?;
        Self::from_shape(shape)
    }

    /// Parse a token dump from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let shape: DumpShape = serde_json::from_reader(reader)?;
        Self::from_shape(shape)
    }

    /// Load a token dump from a file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Serialize the dump back to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn from_shape(shape: DumpShape) -> Result<Self> {
        let pages = match shape {
            DumpShape::Bare(pages) | DumpShape::Wrapped { pages } => pages,
        };

        for (index, page) in pages.iter().enumerate() {
            if let Some(token) = page.iter().find(|t| t.height < 0.0) {
                return Err(Error::InvalidTokens(format!(
                    "page {}: token {:?} has negative height {}",
                    index + 1,
                    token.text,
                    token.height
                )));
            }
        }

        Ok(Self { pages })
    }
}

impl PageSource for TokenDump {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn extract_page(&self, index: usize) -> Result<Vec<Token>> {
        self.pages
            .get(index)
            .cloned()
            .ok_or(Error::PageOutOfRange(index, self.pages.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_shape() {
        let dump = TokenDump::from_json(
            r#"{"pages": [[{"text": "Hi", "x": 1, "y": 2, "height": 10}], []]}"#,
        )
        .unwrap();
        assert_eq!(dump.page_count(), 2);
        assert_eq!(dump.pages[0][0].text, "Hi");
    }

    #[test]
    fn test_bare_shape() {
        let dump =
            TokenDump::from_json(r#"[[{"text": "a", "x": 0.5, "y": 2, "height": 9.5}]]"#).unwrap();
        assert_eq!(dump.page_count(), 1);
        assert_eq!(dump.pages[0][0].x, 0.5);
    }

    #[test]
    fn test_rejects_negative_height() {
        let result = TokenDump::from_json(r#"[[{"text": "a", "x": 0, "y": 0, "height": -1}]]"#);
        assert!(matches!(result, Err(Error::InvalidTokens(_))));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            TokenDump::from_json("{\"pages\": 3}"),
            Err(Error::Json(_))
        ));
    }
}
