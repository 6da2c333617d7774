//! Testing utilities for pagedeck
//!
//! Provides a scripted [`MockBackend`] standing in for the HTTP backend so
//! session logic can be exercised without a network, plus record builders.
//!
//! Only available when compiled with `cfg(test)`.

use std::sync::Mutex;

use crate::api::{ApiError, DocumentSummary, ExportRequest, PageBackend, PageRecord, QueryDescriptor};

/// Build a page record for tests
#[must_use]
pub fn page(page_id: i64, pdf_name: &str, page_number: u32, text: &str, tags: &str) -> PageRecord {
    PageRecord {
        page_id,
        pdf_name: pdf_name.to_string(),
        page_number,
        text: text.to_string(),
        tags: tags.to_string(),
        vision_summary: None,
    }
}

/// Scripted in-memory backend
///
/// Holds a flat set of page records and answers queries the way the real
/// backend does: by document name, by name set, or by phrase substring with
/// an optional tag filter. Tag updates mutate the stored records so a fresh
/// load observes committed values. Each failure toggle makes the matching
/// operation return an error until restored.
#[derive(Default)]
pub struct MockBackend {
    pages: Mutex<Vec<PageRecord>>,
    updates: Mutex<Vec<(i64, String)>>,
    exports: Mutex<Vec<ExportRequest>>,
    fail_fetch: Mutex<bool>,
    fail_update: Mutex<bool>,
    fail_export: Mutex<bool>,
}

impl MockBackend {
    /// Bytes returned for every successful export
    pub const ARTIFACT: &'static [u8] = b"%PDF-1.4 mock artifact";

    /// Add a page record to the scripted library
    pub fn push_page(&self, page_id: i64, pdf_name: &str, page_number: u32, text: &str, tags: &str) {
        self.pages
            .lock()
            .unwrap()
            .push(page(page_id, pdf_name, page_number, text, tags));
    }

    /// Make every fetch fail until [`restore_fetches`](Self::restore_fetches)
    pub fn fail_fetches(&self) {
        *self.fail_fetch.lock().unwrap() = true;
    }

    /// Let fetches succeed again
    pub fn restore_fetches(&self) {
        *self.fail_fetch.lock().unwrap() = false;
    }

    /// Make every tag update fail
    pub fn fail_updates(&self) {
        *self.fail_update.lock().unwrap() = true;
    }

    /// Make every export fail
    pub fn fail_exports(&self) {
        *self.fail_export.lock().unwrap() = true;
    }

    /// Tag updates received so far, in order
    #[must_use]
    pub fn updates(&self) -> Vec<(i64, String)> {
        self.updates.lock().unwrap().clone()
    }

    /// Export requests received so far, in order
    #[must_use]
    pub fn exports(&self) -> Vec<ExportRequest> {
        self.exports.lock().unwrap().clone()
    }

    fn refused() -> ApiError {
        ApiError::Status {
            status: 500,
            message: "scripted failure".into(),
        }
    }
}

impl PageBackend for MockBackend {
    fn fetch_pages(&self, query: &QueryDescriptor) -> Result<Vec<PageRecord>, ApiError> {
        if *self.fail_fetch.lock().unwrap() {
            return Err(Self::refused());
        }

        let pages = self.pages.lock().unwrap();
        let matched = match query {
            QueryDescriptor::Document(name) => pages
                .iter()
                .filter(|p| &p.pdf_name == name)
                .cloned()
                .collect(),
            QueryDescriptor::Documents(names) => pages
                .iter()
                .filter(|p| names.contains(&p.pdf_name))
                .cloned()
                .collect(),
            QueryDescriptor::Phrase { query, tag } => pages
                .iter()
                .filter(|p| p.text.to_lowercase().contains(&query.to_lowercase()))
                .filter(|p| {
                    tag.as_ref()
                        .is_none_or(|t| p.tags.to_lowercase().contains(&t.to_lowercase()))
                })
                .cloned()
                .collect(),
        };
        Ok(matched)
    }

    fn list_documents(&self) -> Result<Vec<DocumentSummary>, ApiError> {
        if *self.fail_fetch.lock().unwrap() {
            return Err(Self::refused());
        }

        let pages = self.pages.lock().unwrap();
        let mut summaries: Vec<DocumentSummary> = Vec::new();
        for page in pages.iter() {
            if let Some(existing) = summaries.iter_mut().find(|s| s.pdf_name == page.pdf_name) {
                existing.page_count += 1;
            } else {
                summaries.push(DocumentSummary {
                    pdf_name: page.pdf_name.clone(),
                    page_count: 1,
                    image_heavy_count: 0,
                });
            }
        }
        Ok(summaries)
    }

    fn list_tags(&self) -> Result<Vec<String>, ApiError> {
        if *self.fail_fetch.lock().unwrap() {
            return Err(Self::refused());
        }

        let pages = self.pages.lock().unwrap();
        let mut tags: Vec<String> = pages
            .iter()
            .flat_map(|p| p.tags.split(','))
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        tags.sort();
        tags.dedup();
        Ok(tags)
    }

    fn update_tags(&self, page_id: i64, tags: &str) -> Result<(), ApiError> {
        if *self.fail_update.lock().unwrap() {
            return Err(Self::refused());
        }

        self.updates
            .lock()
            .unwrap()
            .push((page_id, tags.to_string()));
        if let Some(page) = self
            .pages
            .lock()
            .unwrap()
            .iter_mut()
            .find(|p| p.page_id == page_id)
        {
            page.tags = tags.to_string();
        }
        Ok(())
    }

    fn export_pages(&self, request: &ExportRequest) -> Result<Vec<u8>, ApiError> {
        if *self.fail_export.lock().unwrap() {
            return Err(Self::refused());
        }

        self.exports.lock().unwrap().push(request.clone());
        Ok(Self::ARTIFACT.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fetch_by_document() {
        let backend = MockBackend::default();
        backend.push_page(1, "a.pdf", 1, "alpha", "x");
        backend.push_page(2, "b.pdf", 1, "beta", "y");

        let pages = backend
            .fetch_pages(&QueryDescriptor::Document("a.pdf".into()))
            .unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page_id, 1);
    }

    #[test]
    fn test_mock_phrase_query_with_tag_filter() {
        let backend = MockBackend::default();
        backend.push_page(1, "a.pdf", 1, "counting apples", "math");
        backend.push_page(2, "a.pdf", 2, "counting stars", "science");

        let pages = backend
            .fetch_pages(&QueryDescriptor::Phrase {
                query: "counting".into(),
                tag: Some("math".into()),
            })
            .unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page_id, 1);
    }

    #[test]
    fn test_mock_update_is_visible_to_next_fetch() {
        let backend = MockBackend::default();
        backend.push_page(1, "a.pdf", 1, "alpha", "old");

        backend.update_tags(1, "new").unwrap();
        let pages = backend
            .fetch_pages(&QueryDescriptor::Document("a.pdf".into()))
            .unwrap();

        assert_eq!(pages[0].tags, "new");
    }

    #[test]
    fn test_mock_list_tags_is_sorted_and_distinct() {
        let backend = MockBackend::default();
        backend.push_page(1, "a.pdf", 1, "", "Math, fall");
        backend.push_page(2, "a.pdf", 2, "", "fall, science");

        let tags = backend.list_tags().unwrap();

        assert_eq!(tags, vec!["fall", "math", "science"]);
    }
}
