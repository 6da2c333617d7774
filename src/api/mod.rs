//! HTTP client for the page-library backend
//!
//! The backend owns the page records; this module is the only place that
//! speaks its wire protocol. All read and write operations go through the
//! [`PageBackend`] trait so the session layer can be exercised against a
//! scripted backend in tests.
//!
//! # Endpoints
//!
//! - `GET /pages_by_pdf?pdf_name=N` - pages of one document
//! - `POST /pages/by-files` - pages of a set of documents
//! - `GET /search?q=P&tag=T` - pages matching a phrase, optional tag filter
//! - `GET /files` - ingested document summaries
//! - `GET /tags` - distinct tag listing
//! - `PATCH /pages/{id}/tags` - commit a tag string
//! - `POST /export_pages` - compile an ordered page subset, returns binary

mod error;
mod types;

pub use error::ApiError;
pub use types::{
    DocumentSummary, ExportRequest, FileNamesRequest, PageRecord, QueryDescriptor, TagUpdate,
};

use std::io::Read;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Read/write interface to the page-library backend
///
/// `Send + Sync` so fire-and-forget commits can run on a detached thread
/// while the session keeps handling user input.
pub trait PageBackend: Send + Sync {
    /// Fetch the page records matching a query descriptor
    ///
    /// # Errors
    /// Returns `ApiError` if the request fails or the response cannot be parsed.
    fn fetch_pages(&self, query: &QueryDescriptor) -> Result<Vec<PageRecord>, ApiError>;

    /// List ingested documents with their page counts
    ///
    /// # Errors
    /// Returns `ApiError` if the request fails or the response cannot be parsed.
    fn list_documents(&self) -> Result<Vec<DocumentSummary>, ApiError>;

    /// List all distinct tags known to the backend
    ///
    /// # Errors
    /// Returns `ApiError` if the request fails or the response cannot be parsed.
    fn list_tags(&self) -> Result<Vec<String>, ApiError>;

    /// Commit a tag string for one page. Idempotent on the backend side.
    ///
    /// # Errors
    /// Returns `ApiError` if the request fails or the backend rejects it.
    fn update_tags(&self, page_id: i64, tags: &str) -> Result<(), ApiError>;

    /// Compile the ordered page subset into a single artifact
    ///
    /// # Errors
    /// Returns `ApiError` if the request fails; on success the binary
    /// artifact body is returned as-is.
    fn export_pages(&self, request: &ExportRequest) -> Result<Vec<u8>, ApiError>;
}

/// `PageBackend` implementation over HTTP
///
/// No explicit request timeout is applied beyond the transport defaults;
/// every retry is a fresh, explicit user action.
pub struct HttpBackend {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpBackend {
    /// Create a client for the backend at `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .build();

        Self { base_url, agent }
    }

    /// Base URL this client talks to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl PageBackend for HttpBackend {
    fn fetch_pages(&self, query: &QueryDescriptor) -> Result<Vec<PageRecord>, ApiError> {
        match query {
            QueryDescriptor::Document(name) => {
                let response = self
                    .agent
                    .get(&self.url("pages_by_pdf"))
                    .query("pdf_name", name)
                    .call()?;
                Ok(response.into_json()?)
            }
            QueryDescriptor::Documents(names) => {
                if names.is_empty() {
                    return Err(ApiError::InvalidInput("no document names given".into()));
                }
                let payload = FileNamesRequest {
                    file_names: names.clone(),
                };
                let response = self
                    .agent
                    .post(&self.url("pages/by-files"))
                    .send_json(serde_json::to_value(&payload)?)?;
                Ok(response.into_json()?)
            }
            QueryDescriptor::Phrase { query, tag } => {
                let mut request = self.agent.get(&self.url("search")).query("q", query);
                if let Some(tag) = tag {
                    request = request.query("tag", tag);
                }
                Ok(request.call()?.into_json()?)
            }
        }
    }

    fn list_documents(&self) -> Result<Vec<DocumentSummary>, ApiError> {
        Ok(self.agent.get(&self.url("files")).call()?.into_json()?)
    }

    fn list_tags(&self) -> Result<Vec<String>, ApiError> {
        Ok(self.agent.get(&self.url("tags")).call()?.into_json()?)
    }

    fn update_tags(&self, page_id: i64, tags: &str) -> Result<(), ApiError> {
        let payload = TagUpdate {
            tags: tags.to_string(),
        };
        self.agent
            .request("PATCH", &self.url(&format!("pages/{page_id}/tags")))
            .send_json(serde_json::to_value(&payload)?)?;
        Ok(())
    }

    fn export_pages(&self, request: &ExportRequest) -> Result<Vec<u8>, ApiError> {
        let response = self
            .agent
            .post(&self.url("export_pages"))
            .send_json(serde_json::to_value(request)?)?;

        let mut artifact = Vec::new();
        response.into_reader().read_to_end(&mut artifact)?;
        Ok(artifact)
    }
}

/// Spawn a detached tag-update task
///
/// Fire-and-forget: a failure is logged to stderr and otherwise swallowed so
/// the caller's draft state stays untouched and the user may simply retry.
/// The join handle is returned so a caller that cares (tests, a future
/// cancellation path) can await the outcome.
pub fn spawn_update_tags(
    backend: Arc<dyn PageBackend>,
    page_id: i64,
    tags: String,
) -> thread::JoinHandle<bool> {
    thread::spawn(move || match backend.update_tags(page_id, &tags) {
        Ok(()) => true,
        Err(err) => {
            eprintln!("Tag update failed for page {page_id}: {err}");
            false
        }
    })
}
