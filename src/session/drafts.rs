//! Per-page tag draft buffer
//!
//! Drafts live beside the read-only snapshot: editing a draft is a pure
//! local mutation with no backend call and no validation (any string,
//! including empty, is a legal tag value). A commit is fire-and-forget; on
//! failure the draft is left as-is so the user may simply save again.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use crate::api::{PageBackend, PageRecord, spawn_update_tags};

/// Mutable tag drafts keyed by page id
#[derive(Debug, Default, Clone)]
pub struct TagDrafts {
    drafts: HashMap<i64, String>,
}

impl TagDrafts {
    /// Create an empty draft buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the buffer to the committed tag values of a fresh snapshot
    ///
    /// After seeding, the draft for every record equals its `tags` field.
    /// Drafts for pages absent from the snapshot are dropped.
    pub fn seed(&mut self, records: &[PageRecord]) {
        self.drafts = records
            .iter()
            .map(|r| (r.page_id, r.tags.clone()))
            .collect();
    }

    /// Overwrite the draft for one page. Local only, no backend call.
    pub fn set_draft(&mut self, page_id: i64, text: impl Into<String>) {
        self.drafts.insert(page_id, text.into());
    }

    /// Current draft for a page, empty string when none exists
    #[must_use]
    pub fn draft(&self, page_id: i64) -> &str {
        self.drafts.get(&page_id).map_or("", String::as_str)
    }

    /// Whether a draft exists for the page
    #[must_use]
    pub fn contains(&self, page_id: i64) -> bool {
        self.drafts.contains_key(&page_id)
    }

    /// Send the current draft for `page_id` to the backend
    ///
    /// Fire-and-forget: the draft is not reverted on failure and the failure
    /// is only logged. The returned handle resolves to whether the commit
    /// succeeded.
    pub fn commit(&self, backend: Arc<dyn PageBackend>, page_id: i64) -> thread::JoinHandle<bool> {
        spawn_update_tags(backend, page_id, self.draft(page_id).to_string())
    }
}
