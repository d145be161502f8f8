//! Recognized text tokens as delivered by the OCR step.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Axis-aligned bounding box in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

/// A recognized word or line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Recognized text.
    pub text: String,

    /// Recognition confidence (0 - 100). Shown to the operator only.
    #[serde(default = "full_confidence")]
    pub confidence: f32,

    /// Where the text was found, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
}

fn full_confidence() -> f32 {
    100.0
}

impl Token {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
            bbox: None,
        }
    }

    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Token::new(text, full_confidence())
    }
}

impl From<String> for Token {
    fn from(text: String) -> Self {
        Token::new(text, full_confidence())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TokenRecord {
    Text(String),
    Full(Token),
}

impl From<TokenRecord> for Token {
    fn from(record: TokenRecord) -> Self {
        match record {
            TokenRecord::Text(text) => Token::from(text),
            TokenRecord::Full(token) => token,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TokenDocument {
    List(Vec<TokenRecord>),
    Words { words: Vec<TokenRecord> },
}

/// Parse a token batch from JSON.
///
/// Accepts a plain array of strings, an array of `{text, confidence, bbox}`
/// records, a mix of both, or an object with a `words` array.
pub fn parse_tokens(json: &str) -> Result<Vec<Token>> {
    let document: TokenDocument = serde_json::from_str(json)?;
    let records = match document {
        TokenDocument::List(records) => records,
        TokenDocument::Words { words } => words,
    };
    let tokens: Vec<Token> = records.into_iter().map(Token::from).collect();
    debug!("Parsed {} tokens", tokens.len());
    Ok(tokens)
}

/// Read a token batch from a JSON file.
pub fn load_tokens(path: &Path) -> Result<Vec<Token>> {
    let content = std::fs::read_to_string(path)?;
    parse_tokens(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_plain_strings() {
        let tokens = parse_tokens(r#"["GSM", "120"]"#).unwrap();
        assert_eq!(tokens, vec![Token::new("GSM", 100.0), Token::new("120", 100.0)]);
    }

    #[test]
    fn test_parse_records_and_words() {
        let json = r#"{
            "words": [
                {"text": "Фото", "confidence": 87.5,
                 "bbox": {"x0": 1.0, "y0": 2.0, "x1": 30.0, "y1": 12.0}},
                "15"
            ]
        }"#;
        let tokens = parse_tokens(json).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "Фото");
        assert_eq!(tokens[0].confidence, 87.5);
        assert_eq!(tokens[0].bbox.map(|b| b.x1), Some(30.0));
        assert_eq!(tokens[1].confidence, 100.0);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_tokens("{\"text\": 1}").is_err());
    }
}
