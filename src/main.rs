//! Pagedeck CLI application entry point
//!
//! This is the main executable for pagedeck, a client for page-library
//! backends: services that ingest documents, split them into pages and keep
//! a free-text tag string per page. Pagedeck lists and searches those pages,
//! edits their tags, and compiles ordered page subsets into downloadable
//! files.
//!
//! # Usage
//!
//! ```bash
//! # Interactive compose session over two documents (default command)
//! pagedeck compose --names "unit1.pdf,unit2.pdf"
//!
//! # Compose starting from a search
//! pagedeck compose --query "counting by tens" --tag math
//!
//! # List ingested documents / pages / tags
//! pagedeck docs
//! pagedeck pages unit1.pdf
//! pagedeck tags
//!
//! # Search without starting a session
//! pagedeck search "counting by tens" --tag math
//!
//! # Commit a tag string directly
//! pagedeck tag 42 "math, grade 3"
//!
//! # One-shot export
//! pagedeck export --ids 3,1,2 --title "Unit 1" --output unit.pdf
//!
//! # Quiet mode (only output results)
//! pagedeck -q search "counting by tens"
//! ```
//!
//! # Configuration
//!
//! The backend URL and download directory are stored in the user's config
//! directory (`~/.config/pagedeck/config.toml` on Linux) and can be
//! overridden per invocation with `--backend`.

use std::sync::Arc;

use pagedeck::{
    PagedeckError,
    api::{HttpBackend, PageBackend, QueryDescriptor},
    cli::{Cli, Commands, compose_query},
    compose,
    config::PagedeckConfig,
    export::{self, ExportOutcome, ExportSurface},
    output,
    session::WorkSession,
};

type Result<T> = std::result::Result<T, PagedeckError>;

/// Handle the docs command - list ingested documents
///
/// # Errors
///
/// Returns `PagedeckError` if the backend request fails.
fn handle_docs(backend: &dyn PageBackend, quiet: bool) -> Result<()> {
    let documents = backend.list_documents()?;

    if documents.is_empty() {
        if !quiet {
            println!("No documents found.");
        }
        return Ok(());
    }

    if !quiet {
        println!("Ingested documents:");
    }
    for doc in documents {
        println!("{}", output::document_line(&doc, quiet));
    }
    Ok(())
}

/// Handle the pages and search commands - print a page listing
///
/// Fetches the records for `query` and prints them. An empty result is
/// reported as "no pages found", not an error.
///
/// # Errors
///
/// Returns `PagedeckError` if the backend request fails.
fn handle_listing(backend: &dyn PageBackend, query: &QueryDescriptor, quiet: bool) -> Result<()> {
    let records = backend.fetch_pages(query)?;

    if records.is_empty() {
        if !quiet {
            println!("No pages found for {}.", query.describe());
        }
        return Ok(());
    }

    if !quiet {
        println!("Found {} page(s) for {}:", records.len(), query.describe());
    }
    for record in records {
        println!("{}", output::page_line(&record, false, quiet));
    }
    Ok(())
}

/// Handle the tags command - list all distinct tags
///
/// # Errors
///
/// Returns `PagedeckError` if the backend request fails.
fn handle_tags(backend: &dyn PageBackend, quiet: bool) -> Result<()> {
    let tags = backend.list_tags()?;

    if tags.is_empty() {
        if !quiet {
            println!("No tags found.");
        }
        return Ok(());
    }

    if !quiet {
        println!("Tags in library:");
    }
    for tag in tags {
        if quiet {
            println!("{tag}");
        } else {
            println!("  {tag}");
        }
    }
    Ok(())
}

/// Handle the tag command - commit a tag string for one page
///
/// Unlike the session's fire-and-forget saves, the direct command reports
/// the outcome synchronously.
///
/// # Errors
///
/// Returns `PagedeckError` if the backend rejects the update.
fn handle_tag(backend: &dyn PageBackend, page_id: i64, tags: &[String], quiet: bool) -> Result<()> {
    let tag_string = tags.join(" ");
    backend.update_tags(page_id, &tag_string)?;

    if !quiet {
        println!("Tags updated for page {page_id}: {tag_string}");
    }
    Ok(())
}

/// Handle the export command - one-shot export of an explicit id list
///
/// # Errors
///
/// Returns `PagedeckError` if the compilation request or the local write fails.
fn handle_export(
    backend: &dyn PageBackend,
    config: &PagedeckConfig,
    ids: &[i64],
    title: Option<&str>,
    filename: Option<&str>,
    open_after: bool,
    quiet: bool,
) -> Result<()> {
    let outcome = export::build_and_submit(
        backend,
        ids,
        title,
        filename.unwrap_or(""),
        ExportSurface::Search,
        &config.resolve_download_dir(),
    )?;

    match outcome {
        ExportOutcome::Saved(path) => {
            if quiet {
                println!("{}", path.display());
            } else {
                println!("Exported {} page(s) to {}", ids.len(), path.display());
            }
            if open_after {
                if let Err(err) = open::that(&path) {
                    eprintln!("Failed to open {}: {err}", path.display());
                }
            }
        }
        ExportOutcome::NothingSelected => {
            if !quiet {
                println!("No page ids given; nothing exported.");
            }
        }
    }
    Ok(())
}

/// Handle the compose command - run the interactive session
///
/// A failed initial load is reported but does not abort the session; the
/// user can issue another `load` from inside the loop.
///
/// # Errors
///
/// Returns `PagedeckError` only for terminal I/O failures.
fn handle_compose(
    backend: Arc<dyn PageBackend>,
    config: &PagedeckConfig,
    names: Vec<String>,
    query: Option<String>,
    tag: Option<String>,
    filter: Option<String>,
    quiet: bool,
) -> Result<()> {
    // Document-based sessions export as "filtered_pages.pdf", search-based
    // (and empty) sessions as "exported_pages.pdf"
    let surface = if names.is_empty() {
        ExportSurface::Search
    } else {
        ExportSurface::Documents
    };

    let initial = compose_query(&names, query.as_deref(), tag.as_deref())?;

    let mut session = WorkSession::new(backend);
    if let Some(query) = initial {
        let description = query.describe();
        match session.load(query) {
            Ok(count) if !quiet => println!("Loaded {count} page(s) for {description}."),
            Ok(_) => {}
            Err(err) => eprintln!("Failed to load {description}: {err}"),
        }
    }
    if let Some(filter) = filter {
        session.set_filter(filter);
    }

    compose::run(
        &mut session,
        surface,
        &config.resolve_download_dir(),
        quiet,
    )
}

/// Main entry point for the pagedeck application
///
/// Loads configuration, parses command-line arguments, and dispatches to the
/// appropriate command handler.
///
/// # Errors
///
/// Returns `PagedeckError` if configuration loading fails or a command
/// handler returns an error.
fn main() -> Result<()> {
    let config = PagedeckConfig::load()?;

    let cli = Cli::parse_args();

    let quiet = cli.quiet || config.quiet;
    let backend_url = cli
        .backend
        .clone()
        .unwrap_or_else(|| config.backend_url.clone());
    let backend: Arc<dyn PageBackend> = Arc::new(HttpBackend::new(backend_url));

    match cli.get_command() {
        Commands::Docs => handle_docs(backend.as_ref(), quiet),
        Commands::Pages { name } => {
            handle_listing(backend.as_ref(), &QueryDescriptor::Document(name), quiet)
        }
        Commands::Search { phrase, tag } => handle_listing(
            backend.as_ref(),
            &QueryDescriptor::Phrase { query: phrase, tag },
            quiet,
        ),
        Commands::Tags => handle_tags(backend.as_ref(), quiet),
        Commands::Tag { page_id, tags } => handle_tag(backend.as_ref(), page_id, &tags, quiet),
        Commands::Export {
            ids,
            title,
            output,
            open,
        } => handle_export(
            backend.as_ref(),
            &config,
            &ids,
            title.as_deref(),
            output.as_deref(),
            open,
            quiet,
        ),
        Commands::Compose {
            names,
            query,
            tag,
            filter,
        } => handle_compose(backend, &config, names, query, tag, filter, quiet),
    }
}
