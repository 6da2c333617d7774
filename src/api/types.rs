//! Wire types shared with the page-library backend
//!
//! These mirror the JSON shapes the backend speaks. Unknown fields in
//! responses (e.g. search relevance scores) are ignored during
//! deserialization.

use serde::{Deserialize, Serialize};

/// A single page's metadata and content as known to the backend
///
/// The client holds these as an immutable snapshot per query; the tag string
/// is edited through a separate draft buffer and only converges with the
/// record after a successful commit and a fresh load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageRecord {
    /// Backend-assigned unique page identifier
    pub page_id: i64,
    /// Name of the parent document
    pub pdf_name: String,
    /// 1-based page number within the parent document
    pub page_number: u32,
    /// Extracted text, possibly empty
    #[serde(default)]
    pub text: String,
    /// Current committed tag string (free text, comma-separated by convention)
    #[serde(default)]
    pub tags: String,
    /// Optional vision-derived summary text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision_summary: Option<String>,
}

/// Summary of one ingested document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentSummary {
    /// Document name as stored by the backend
    pub pdf_name: String,
    /// Number of pages ingested from this document
    pub page_count: u32,
    /// Pages flagged as image-heavy during ingestion
    #[serde(default)]
    pub image_heavy_count: u32,
}

/// Which page records to fetch from the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryDescriptor {
    /// All pages of a single document, by exact name
    Document(String),
    /// All pages of a set of documents
    Documents(Vec<String>),
    /// Semantic search by phrase, optionally restricted to a tag
    Phrase {
        query: String,
        tag: Option<String>,
    },
}

impl QueryDescriptor {
    /// Human-readable description of the query, for status messages
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Document(name) => format!("document '{name}'"),
            Self::Documents(names) => format!("documents [{}]", names.join(", ")),
            Self::Phrase { query, tag: None } => format!("phrase '{query}'"),
            Self::Phrase {
                query,
                tag: Some(tag),
            } => format!("phrase '{query}' (tag '{tag}')"),
        }
    }
}

/// Payload for a tag update commit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagUpdate {
    pub tags: String,
}

/// Payload for fetching pages of several documents at once
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileNamesRequest {
    pub file_names: Vec<String>,
}

/// Export compilation request
///
/// The id list is carried twice for backend compatibility: `page_ids` as the
/// membership set and `order` as the authoritative page order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportRequest {
    pub page_ids: Vec<i64>,
    pub order: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}
