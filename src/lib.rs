//! Pagedeck - a page selection and export client for document libraries
//!
//! This library implements the client side of a page-library workflow: a
//! backend service has already ingested documents, split them into pages and
//! stored a free-text tag string per page. Pagedeck queries those page
//! records, keeps per-page tag drafts, maintains an ordered working set of
//! page identifiers, and asks the backend to compile the ordered subset into
//! a single downloadable artifact.

use thiserror::Error;

pub mod api;
pub mod cli;
pub mod compose;
pub mod config;
pub mod export;
pub mod output;
pub mod session;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum PagedeckError {
    /// Backend communication error
    #[error("Backend error: {0}")]
    Api(#[from] api::ApiError),
    /// Export compilation or artifact write error
    #[error("Export error: {0}")]
    Export(#[from] export::ExportError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
