//! Structured rich-text documents in the Slate JSON shape used by the web editor.
//!
//! A document is a list of block elements; each element has a `type`, a list of
//! children (nested elements or text leaves) and any extra attributes the editor
//! attached. Leaves carry `text` plus arbitrary marks (`bold`, `italic`, ...).
//! Unknown attributes and marks are preserved so a round trip through this type
//! never loses formatting.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const TITLE_PLACEHOLDER: &str = "Heading";
pub const DESCRIPTION_PLACEHOLDER: &str = "Click here to add description";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document has no blocks")]
    Empty,
    #[error("document has no block {0}")]
    NoSuchBlock(usize),
    #[error("block {0} has nested or split content and cannot be edited as text")]
    ReadOnlyBlock(usize),
}

/// Text projection of one top-level block for a plain-text editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub text: String,
    /// False when the block nests elements or splits its text across leaves.
    pub editable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "type", default = "default_block_kind")]
    pub kind: String,
    pub children: Vec<Node>,
    #[serde(flatten)]
    pub attrs: Map<String, Value>,
}

fn default_block_kind() -> String {
    "paragraph".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLeaf {
    pub text: String,
    #[serde(flatten)]
    pub marks: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Text(TextLeaf),
}

impl Node {
    fn text(text: impl Into<String>) -> Self {
        Node::Text(TextLeaf {
            text: text.into(),
            marks: Map::new(),
        })
    }

    fn block(kind: &str, text: impl Into<String>) -> Self {
        Node::Element(Element {
            kind: kind.to_string(),
            children: vec![Node::text(text)],
            attrs: Map::new(),
        })
    }

    /// The single leaf of a flat block; its marks stay untouched when the
    /// text is rewritten.
    fn sole_leaf_mut(&mut self) -> Option<&mut TextLeaf> {
        match self {
            Node::Element(element) => match element.children.as_mut_slice() {
                [Node::Text(leaf)] => Some(leaf),
                _ => None,
            },
            Node::Text(_) => None,
        }
    }

    fn is_flat(&self) -> bool {
        match self {
            Node::Element(element) => matches!(element.children.as_slice(), [Node::Text(_)]),
            Node::Text(_) => false,
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(leaf) => out.push_str(&leaf.text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(pub Vec<Node>);

impl Document {
    pub fn heading(text: impl Into<String>) -> Self {
        Self(vec![Node::block("heading", text)])
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self(vec![Node::block("paragraph", text)])
    }

    /// One paragraph per line, the shape a plain-text editor produces.
    pub fn from_plain_lines(text: &str) -> Self {
        let blocks: Vec<Node> = text.lines().map(|line| Node::block("paragraph", line)).collect();
        if blocks.is_empty() {
            Self::paragraph("")
        } else {
            Self(blocks)
        }
    }

    pub fn placeholder_title() -> Self {
        Self::heading(TITLE_PLACEHOLDER)
    }

    pub fn placeholder_description() -> Self {
        Self::paragraph(DESCRIPTION_PLACEHOLDER)
    }

    /// Text of the first block; titles are single-block documents.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        if let Some(first) = self.0.first() {
            first.collect_text(&mut out);
        }
        out
    }

    /// Text of every block, newline separated.
    pub fn full_text(&self) -> String {
        self.0
            .iter()
            .map(|block| {
                let mut out = String::new();
                block.collect_text(&mut out);
                out
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn blocks(&self) -> Vec<TextBlock> {
        self.0
            .iter()
            .map(|block| {
                let mut text = String::new();
                block.collect_text(&mut text);
                TextBlock {
                    text,
                    editable: block.is_flat(),
                }
            })
            .collect()
    }

    /// Rewrites the text of one flat block in place. Element attributes and
    /// leaf marks are kept, so writing back the original text restores the
    /// original document exactly.
    pub fn set_block_text(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), DocumentError> {
        let block = self
            .0
            .get_mut(index)
            .ok_or(DocumentError::NoSuchBlock(index))?;
        let leaf = block
            .sole_leaf_mut()
            .ok_or(DocumentError::ReadOnlyBlock(index))?;
        leaf.text = text.into();
        Ok(())
    }

    pub fn push_paragraph(&mut self, text: impl Into<String>) {
        self.0.push(Node::block("paragraph", text));
    }

    pub fn to_json_string(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, DocumentError> {
        let document: Document = serde_json::from_str(raw)?;
        if document.0.is_empty() {
            return Err(DocumentError::Empty);
        }
        Ok(document)
    }

    /// Description as stored by the backend. Missing or blank keeps the
    /// placeholder; text that is not a serialized document becomes one paragraph.
    pub fn from_description(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::placeholder_description(),
            Some(raw) => Self::from_json_str(raw).unwrap_or_else(|_| Self::from_plain_lines(raw)),
        }
    }
}

#[cfg(test)]
#[path = "tests/document_tests.rs"]
mod tests;
