//! Read-only snapshot of page records for the active query
//!
//! Each successful load replaces the snapshot wholesale; snapshots are never
//! merged. On failure the previous snapshot is kept (stale view) and a
//! loading-failed flag is raised - no retry happens automatically.

use crate::api::{ApiError, PageBackend, PageRecord, QueryDescriptor};

/// Normalize text for filtering: lowercase with colons stripped
///
/// Colons are stripped so filters like "Grade 3" match "Grade: 3" headers.
#[must_use]
pub fn normalized(text: &str) -> String {
    text.to_lowercase().replace(':', "")
}

/// Immutable per-query snapshot of backend page records
#[derive(Default)]
pub struct PageStore {
    records: Vec<PageRecord>,
    load_failed: bool,
}

impl PageStore {
    /// Create an empty store
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
            load_failed: false,
        }
    }

    /// Fetch records for `query` and replace the snapshot
    ///
    /// On failure the previous snapshot is left in place and
    /// [`load_failed`](Self::load_failed) reports `true` until the next
    /// successful load.
    ///
    /// # Errors
    /// Returns `ApiError` when the backend request fails; never fatal to the
    /// session, the caller decides how to surface it.
    pub fn load(
        &mut self,
        backend: &dyn PageBackend,
        query: &QueryDescriptor,
    ) -> Result<usize, ApiError> {
        match backend.fetch_pages(query) {
            Ok(records) => {
                self.records = records;
                self.load_failed = false;
                Ok(self.records.len())
            }
            Err(err) => {
                self.load_failed = true;
                Err(err)
            }
        }
    }

    /// Whether the most recent load attempt failed
    #[must_use]
    pub const fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// All records in the current snapshot
    #[must_use]
    pub fn records(&self) -> &[PageRecord] {
        &self.records
    }

    /// Look up a record by page id
    #[must_use]
    pub fn get(&self, page_id: i64) -> Option<&PageRecord> {
        self.records.iter().find(|r| r.page_id == page_id)
    }

    /// All page ids in snapshot order
    #[must_use]
    pub fn ids(&self) -> Vec<i64> {
        self.records.iter().map(|r| r.page_id).collect()
    }

    /// Records whose text matches the free-text filter, in snapshot order
    ///
    /// An empty filter matches everything.
    #[must_use]
    pub fn visible(&self, filter: &str) -> Vec<&PageRecord> {
        let needle = normalized(filter);
        self.records
            .iter()
            .filter(|r| needle.is_empty() || normalized(&r.text).contains(&needle))
            .collect()
    }

    /// Ids of the records visible under the filter, in displayed order
    #[must_use]
    pub fn visible_ids(&self, filter: &str) -> Vec<i64> {
        self.visible(filter).iter().map(|r| r.page_id).collect()
    }

    /// Whether the snapshot holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
