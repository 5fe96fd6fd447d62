//! Shared types used across the content model.
//!
//! These types are serialized to the JSON manifest written by `scan` and read
//! back by every later command, so they must stay identical across modules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Well-known field names stored on nodes.
pub mod fields {
    /// Ficha text of a case, or the statement of a question.
    pub const DESCRIPTION: &str = "description";
    /// Media reference (video URL) shown in the case modal.
    pub const VIDEO: &str = "video";
    /// Ordered list of raw document entries attached to a case.
    pub const DOCUMENTS: &str = "documents";
    /// Reference handed to the interactive-question embed.
    pub const EMBED: &str = "embed";
}

/// Identifier of a page in the content tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// Arbitrary structured fields attached to a node.
pub type Fields = BTreeMap<String, serde_json::Value>;

/// A page in the content tree: the site root, a case, a question, or anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    pub title: String,
    /// Explicit ordering among siblings (lower first).
    pub sort_order: i64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: Fields,
}

impl Node {
    pub fn new(id: u64, parent_id: Option<u64>, title: &str, sort_order: i64) -> Self {
        Self {
            id: NodeId(id),
            parent_id: parent_id.map(NodeId),
            title: title.to_string(),
            sort_order,
            fields: Fields::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with_field(mut self, key: &str, value: serde_json::Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// A string field, trimmed, or `None` if missing, not a string, or blank.
    pub fn text_field(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// One row of a case's document list, as authored.
///
/// Either URL may be missing while the row is being edited; resolution
/// degrades to a placeholder rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDocumentEntry {
    /// Type tag such as `"PDF"` or `"ENLACE WEB"`.
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
}

/// Document type, parsed from the authored tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Excel,
    Word,
    PowerPoint,
    WebLink,
    /// Unrecognized tag, kept verbatim. Renders without an icon.
    Other(String),
}

impl DocumentKind {
    /// Parse a type tag. Matching ignores case and surrounding whitespace.
    ///
    /// - `"PDF"` → `Pdf`
    /// - `"ENLACE WEB"`, `"weblink"` → `WebLink`
    /// - `"Power Point"`, `"PPT"` → `PowerPoint`
    /// - anything else → `Other(tag)`
    pub fn from_tag(tag: &str) -> Self {
        let trimmed = tag.trim();
        match trimmed.to_uppercase().as_str() {
            "PDF" => DocumentKind::Pdf,
            "EXCEL" | "XLS" | "XLSX" => DocumentKind::Excel,
            "WORD" | "DOC" | "DOCX" => DocumentKind::Word,
            "POWERPOINT" | "POWER POINT" | "PPT" | "PPTX" => DocumentKind::PowerPoint,
            "ENLACE WEB" | "ENLACE" | "WEBLINK" | "WEB LINK" => DocumentKind::WebLink,
            _ => DocumentKind::Other(trimmed.to_string()),
        }
    }

    /// Short label for CLI output.
    pub fn label(&self) -> &str {
        match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Excel => "EXCEL",
            DocumentKind::Word => "WORD",
            DocumentKind::PowerPoint => "POWERPOINT",
            DocumentKind::WebLink => "WEBLINK",
            DocumentKind::Other(tag) => tag.as_str(),
        }
    }
}

/// A render-ready document row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDescriptor {
    pub kind: DocumentKind,
    pub display_name: String,
    pub resolved_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}
