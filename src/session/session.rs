//! Composed working session
//!
//! Ties the snapshot, the tag drafts and the ordered selection together and
//! keeps their invariants aligned: every selected id refers to a record in
//! the current snapshot, and drafts are re-seeded from every fresh load.

use std::path::Path;
use std::sync::Arc;
use std::thread;

use crate::api::{ApiError, PageBackend, PageRecord, QueryDescriptor};
use crate::export::{self, ExportError, ExportOutcome, ExportSurface};
use crate::session::drafts::TagDrafts;
use crate::session::selection::Selection;
use crate::session::store::PageStore;

/// Interactive working session over one backend
///
/// All mutation goes through these operations; the UI layer only translates
/// user gestures into calls on this type.
pub struct WorkSession {
    backend: Arc<dyn PageBackend>,
    store: PageStore,
    drafts: TagDrafts,
    selection: Selection,
    filter: String,
    title: String,
    query: Option<QueryDescriptor>,
}

impl WorkSession {
    /// Create a session with an empty snapshot and selection
    #[must_use]
    pub fn new(backend: Arc<dyn PageBackend>) -> Self {
        Self {
            backend,
            store: PageStore::new(),
            drafts: TagDrafts::new(),
            selection: Selection::new(),
            filter: String::new(),
            title: String::new(),
            query: None,
        }
    }

    /// Load a fresh snapshot for `query`
    ///
    /// On success the snapshot is replaced wholesale, drafts are re-seeded
    /// from the returned records, and selected ids no longer present in the
    /// snapshot are pruned (order preserved for survivors). On failure all
    /// session state is left untouched apart from the store's failed flag.
    ///
    /// # Errors
    /// Returns `ApiError` when the backend request fails.
    pub fn load(&mut self, query: QueryDescriptor) -> Result<usize, ApiError> {
        let count = self.store.load(self.backend.as_ref(), &query)?;
        self.drafts.seed(self.store.records());
        self.selection.retain_known(&self.store.ids());
        self.query = Some(query);
        Ok(count)
    }

    /// The query behind the current snapshot, if any
    #[must_use]
    pub const fn query(&self) -> Option<&QueryDescriptor> {
        self.query.as_ref()
    }

    /// Current snapshot store
    #[must_use]
    pub const fn store(&self) -> &PageStore {
        &self.store
    }

    /// Current ordered selection
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Set the free-text filter over the snapshot
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    /// Active free-text filter
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Records visible under the active filter, in snapshot order
    #[must_use]
    pub fn visible(&self) -> Vec<&PageRecord> {
        self.store.visible(&self.filter)
    }

    /// Toggle selection membership for a page
    ///
    /// Ignored when the id does not exist in the current snapshot, so the
    /// selection never references a page the user cannot see.
    pub fn toggle(&mut self, page_id: i64) {
        if self.store.get(page_id).is_some() {
            self.selection.toggle(page_id);
        }
    }

    /// Select every page visible under the active filter, in displayed order
    ///
    /// Overwrites any prior manual ordering.
    pub fn select_all(&mut self) {
        let visible = self.store.visible_ids(&self.filter);
        self.selection.select_all(&visible);
    }

    /// Deselect everything
    pub fn deselect_all(&mut self) {
        self.selection.clear();
    }

    /// Move `from_id` to the slot currently held by `to_id`
    pub fn reorder(&mut self, from_id: i64, to_id: i64) {
        self.selection.reorder(from_id, to_id);
    }

    /// Overwrite the local tag draft for a page
    pub fn set_draft(&mut self, page_id: i64, text: impl Into<String>) {
        self.drafts.set_draft(page_id, text);
    }

    /// Current tag draft for a page (empty when none)
    #[must_use]
    pub fn draft(&self, page_id: i64) -> &str {
        self.drafts.draft(page_id)
    }

    /// Commit the tag draft for a page, fire-and-forget
    ///
    /// Returns the task handle; dropping it detaches the commit. Pages with
    /// no draft (never part of a loaded snapshot) return `None` and send
    /// nothing, so a stray id cannot blank a page's tags on the backend.
    pub fn save_tags(&self, page_id: i64) -> Option<thread::JoinHandle<bool>> {
        self.drafts
            .contains(page_id)
            .then(|| self.drafts.commit(Arc::clone(&self.backend), page_id))
    }

    /// Set the optional title for the next export
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Title for the next export
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Export the current selection in its current order
    ///
    /// No-op when nothing is selected. The selection is preserved regardless
    /// of the outcome so a failed export can be retried manually.
    ///
    /// # Errors
    /// Returns `ExportError` when the compilation request or the local write
    /// fails.
    pub fn export(
        &self,
        filename: &str,
        surface: ExportSurface,
        download_dir: &Path,
    ) -> Result<ExportOutcome, ExportError> {
        let title = if self.title.trim().is_empty() {
            None
        } else {
            Some(self.title.as_str())
        };
        export::build_and_submit(
            self.backend.as_ref(),
            self.selection.ids(),
            title,
            filename,
            surface,
            download_dir,
        )
    }
}
