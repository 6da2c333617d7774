//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for pagedeck using the
//! `clap` crate.
//!
//! # Commands
//!
//! - **compose**: Interactive selection / ordering / export session (default)
//! - **docs**: List ingested documents
//! - **pages**: List pages of a single document
//! - **search**: Search pages by phrase, optionally restricted to a tag
//! - **tags**: List all distinct tags
//! - **tag**: Commit a tag string for one page
//! - **export**: One-shot export of an explicit ordered id list
//!
//! # Design Features
//!
//! - Global `--quiet` flag for scripting-friendly output
//! - Global `--backend` flag overriding the configured backend URL
//! - Command aliases (e.g. `c` for `compose`, `s` for `search`)

use clap::{Parser, Subcommand};

use crate::PagedeckError;
use crate::api::QueryDescriptor;

/// Pagedeck - page selection, tagging and export for document libraries
#[derive(Parser, Debug)]
#[command(name = "pagedeck", version, about)]
pub struct Cli {
    /// Suppress informational output (only print results)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Backend base URL, overrides the configured value
    #[arg(long, global = true, value_name = "URL")]
    pub backend: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The command to run, defaulting to an empty compose session
    #[must_use]
    pub fn get_command(self) -> Commands {
        self.command.unwrap_or(Commands::Compose {
            names: Vec::new(),
            query: None,
            tag: None,
            filter: None,
        })
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive selection, ordering and export session
    #[command(visible_alias = "c")]
    Compose {
        /// Document names to load, comma-separated
        #[arg(long, value_delimiter = ',', value_name = "NAMES")]
        names: Vec<String>,

        /// Search phrase to load instead of document names
        #[arg(long, conflicts_with = "names")]
        query: Option<String>,

        /// Restrict the search phrase to pages carrying this tag
        #[arg(long, requires = "query")]
        tag: Option<String>,

        /// Initial free-text filter over the loaded pages
        #[arg(long)]
        filter: Option<String>,
    },

    /// List ingested documents
    #[command(visible_alias = "d")]
    Docs,

    /// List pages of a single document
    #[command(visible_alias = "p")]
    Pages {
        /// Exact document name
        name: String,
    },

    /// Search pages by phrase
    #[command(visible_alias = "s")]
    Search {
        /// Search phrase
        phrase: String,

        /// Only return pages carrying this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// List all distinct tags
    Tags,

    /// Commit a tag string for one page
    Tag {
        /// Page identifier
        page_id: i64,

        /// Tag text (remaining arguments are joined with spaces)
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Export pages by id, in the given order
    Export {
        /// Ordered page ids, comma-separated
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<i64>,

        /// Optional title page text
        #[arg(short, long)]
        title: Option<String>,

        /// Destination filename (default: exported_pages.pdf)
        #[arg(short, long)]
        output: Option<String>,

        /// Open the exported file with the system default application
        #[arg(long)]
        open: bool,
    },
}

/// Build the initial query for a compose session, if any was requested
///
/// # Errors
///
/// Returns `PagedeckError::InvalidInput` when both document names and a
/// search phrase were given (clap prevents this; kept for programmatic use).
pub fn compose_query(
    names: &[String],
    query: Option<&str>,
    tag: Option<&str>,
) -> Result<Option<QueryDescriptor>, PagedeckError> {
    match (names.is_empty(), query) {
        (false, Some(_)) => Err(PagedeckError::InvalidInput(
            "Cannot combine --names with --query".into(),
        )),
        (false, None) => {
            if names.len() == 1 {
                Ok(Some(QueryDescriptor::Document(names[0].clone())))
            } else {
                Ok(Some(QueryDescriptor::Documents(names.to_vec())))
            }
        }
        (true, Some(query)) => Ok(Some(QueryDescriptor::Phrase {
            query: query.to_string(),
            tag: tag.map(String::from),
        })),
        (true, None) => Ok(None),
    }
}
