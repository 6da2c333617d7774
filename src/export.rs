//! Export request assembly and artifact download
//!
//! Builds the compilation request out of the ordered selection, an optional
//! title and a destination filename, submits it, and writes the binary
//! response to the download directory. The artifact buffer is dropped as
//! soon as the file is written; nothing is retained across exports.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::api::{ApiError, ExportRequest, PageBackend};

/// Default artifact name for the search surface
pub const SEARCH_EXPORT_FILENAME: &str = "exported_pages.pdf";

/// Default artifact name for the single/multi-document surface
pub const DOCUMENT_EXPORT_FILENAME: &str = "filtered_pages.pdf";

/// Export-specific errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// Backend rejected or failed the compilation request
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    /// The compiled artifact could not be written locally
    #[error("Failed to write artifact: {0}")]
    Write(#[from] std::io::Error),
}

/// Which surface requested the export; decides the fallback filename
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportSurface {
    /// Phrase-search surface
    Search,
    /// Single- or multi-document surface
    Documents,
}

impl ExportSurface {
    /// Filename used when the user-supplied name trims to empty
    #[must_use]
    pub const fn default_filename(self) -> &'static str {
        match self {
            Self::Search => SEARCH_EXPORT_FILENAME,
            Self::Documents => DOCUMENT_EXPORT_FILENAME,
        }
    }
}

/// Outcome of an export attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Artifact compiled and written to the given path
    Saved(PathBuf),
    /// The selection was empty; no request was sent
    NothingSelected,
}

/// Submit an export request and save the compiled artifact
///
/// An empty `ordered_ids` is a no-op: no network call is made. The id list
/// is sent twice (`page_ids` and `order`) for backend compatibility, with
/// `order` authoritative. `filename` is trimmed of whitespace and falls back
/// to the surface default when empty. A whitespace-only title is treated as
/// absent.
///
/// # Errors
/// Returns `ExportError` if the backend call fails or the artifact cannot be
/// written. The caller's selection is never touched, so a failed export is
/// retryable as-is.
pub fn build_and_submit(
    backend: &dyn PageBackend,
    ordered_ids: &[i64],
    title: Option<&str>,
    filename: &str,
    surface: ExportSurface,
    download_dir: &Path,
) -> Result<ExportOutcome, ExportError> {
    if ordered_ids.is_empty() {
        return Ok(ExportOutcome::NothingSelected);
    }

    let title = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from);
    let request = ExportRequest {
        page_ids: ordered_ids.to_vec(),
        order: ordered_ids.to_vec(),
        title,
    };

    let artifact = backend.export_pages(&request)?;

    let name = filename.trim();
    let name = if name.is_empty() {
        surface.default_filename()
    } else {
        name
    };
    let path = download_dir.join(name);
    fs::write(&path, artifact)?;

    Ok(ExportOutcome::Saved(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockBackend;

    #[test]
    fn test_empty_selection_sends_nothing() {
        let backend = MockBackend::default();
        let dir = tempfile::tempdir().unwrap();

        let outcome = build_and_submit(
            &backend,
            &[],
            Some("Unit 1"),
            "out.pdf",
            ExportSurface::Search,
            dir.path(),
        )
        .unwrap();

        assert_eq!(outcome, ExportOutcome::NothingSelected);
        assert!(backend.exports().is_empty());
    }

    #[test]
    fn test_request_carries_order_twice_and_title() {
        let backend = MockBackend::default();
        let dir = tempfile::tempdir().unwrap();

        build_and_submit(
            &backend,
            &[1, 2],
            Some("Unit 1"),
            "",
            ExportSurface::Search,
            dir.path(),
        )
        .unwrap();

        let requests = backend.exports();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].page_ids, vec![1, 2]);
        assert_eq!(requests[0].order, vec![1, 2]);
        assert_eq!(requests[0].title.as_deref(), Some("Unit 1"));
    }

    #[test]
    fn test_blank_filename_falls_back_per_surface() {
        let backend = MockBackend::default();
        let dir = tempfile::tempdir().unwrap();

        let outcome = build_and_submit(
            &backend,
            &[1],
            None,
            "   ",
            ExportSurface::Documents,
            dir.path(),
        )
        .unwrap();

        assert_eq!(
            outcome,
            ExportOutcome::Saved(dir.path().join("filtered_pages.pdf"))
        );

        let outcome = build_and_submit(&backend, &[1], None, "", ExportSurface::Search, dir.path())
            .unwrap();

        assert_eq!(
            outcome,
            ExportOutcome::Saved(dir.path().join("exported_pages.pdf"))
        );
    }

    #[test]
    fn test_artifact_bytes_written_to_named_file() {
        let backend = MockBackend::default();
        let dir = tempfile::tempdir().unwrap();

        let outcome = build_and_submit(
            &backend,
            &[3, 1, 2],
            None,
            " unit.pdf ",
            ExportSurface::Search,
            dir.path(),
        )
        .unwrap();

        let path = dir.path().join("unit.pdf");
        assert_eq!(outcome, ExportOutcome::Saved(path.clone()));
        assert_eq!(std::fs::read(path).unwrap(), MockBackend::ARTIFACT);
    }

    #[test]
    fn test_whitespace_title_treated_as_absent() {
        let backend = MockBackend::default();
        let dir = tempfile::tempdir().unwrap();

        build_and_submit(
            &backend,
            &[1],
            Some("   "),
            "x.pdf",
            ExportSurface::Search,
            dir.path(),
        )
        .unwrap();

        assert_eq!(backend.exports()[0].title, None);
    }

    #[test]
    fn test_backend_failure_surfaces_as_error() {
        let backend = MockBackend::default();
        backend.fail_exports();
        let dir = tempfile::tempdir().unwrap();

        let result = build_and_submit(
            &backend,
            &[1],
            None,
            "x.pdf",
            ExportSurface::Search,
            dir.path(),
        );

        assert!(matches!(result, Err(ExportError::Api(_))));
        assert!(!dir.path().join("x.pdf").exists());
    }
}
