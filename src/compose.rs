//! Interactive compose session
//!
//! The line-driven UI surface over [`WorkSession`]: each input line is parsed
//! into a [`ComposeCommand`] and translated into a single session operation.
//! Parsing is pure and unit-testable; only [`run`] touches stdin/stdout.
//!
//! No failure inside the loop is fatal: load errors leave a stale snapshot,
//! tag commits are fire-and-forget, and a failed export keeps the selection
//! so the user can retry.

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::PagedeckError;
use crate::api::QueryDescriptor;
use crate::export::{ExportOutcome, ExportSurface};
use crate::output;
use crate::session::WorkSession;

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeCommand {
    /// Show the pages visible under the active filter
    List,
    /// Show the current selection in order
    ShowSelection,
    /// Toggle selection membership of a page
    Toggle(i64),
    /// Select everything visible under the filter
    SelectAll,
    /// Clear the selection
    DeselectAll,
    /// Move the first id to the slot of the second
    Move(i64, i64),
    /// Set the free-text filter (empty clears it)
    Filter(String),
    /// Overwrite the tag draft for a page
    TagDraft(i64, String),
    /// Commit the tag draft for a page
    Save(i64),
    /// Set the export title (empty clears it)
    Title(String),
    /// Load pages of the named documents, comma-separated
    LoadNames(Vec<String>),
    /// Load pages matching a search phrase
    LoadQuery(String),
    /// Export the selection, with an optional destination filename
    Export(Option<String>),
    /// Show command help
    Help,
    /// Leave the session
    Quit,
    /// Blank line
    Empty,
    /// Anything unrecognized
    Unknown(String),
}

/// Parse one input line into a command
#[must_use]
pub fn parse_command(line: &str) -> ComposeCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ComposeCommand::Empty;
    }

    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };

    match word {
        "list" | "l" => ComposeCommand::List,
        "sel" => ComposeCommand::ShowSelection,
        "toggle" | "t" => match rest.parse() {
            Ok(id) => ComposeCommand::Toggle(id),
            Err(_) => ComposeCommand::Unknown(trimmed.to_string()),
        },
        "all" => ComposeCommand::SelectAll,
        "none" => ComposeCommand::DeselectAll,
        "move" | "m" => {
            let mut parts = rest.split_whitespace();
            match (
                parts.next().and_then(|p| p.parse().ok()),
                parts.next().and_then(|p| p.parse().ok()),
            ) {
                (Some(from), Some(to)) => ComposeCommand::Move(from, to),
                _ => ComposeCommand::Unknown(trimmed.to_string()),
            }
        }
        "filter" | "f" => ComposeCommand::Filter(rest.to_string()),
        "tag" => match rest.split_once(char::is_whitespace) {
            Some((id, text)) => match id.parse() {
                Ok(id) => ComposeCommand::TagDraft(id, text.trim().to_string()),
                Err(_) => ComposeCommand::Unknown(trimmed.to_string()),
            },
            // "tag 7" clears the draft for page 7
            None => match rest.parse() {
                Ok(id) => ComposeCommand::TagDraft(id, String::new()),
                Err(_) => ComposeCommand::Unknown(trimmed.to_string()),
            },
        },
        "save" => match rest.parse() {
            Ok(id) => ComposeCommand::Save(id),
            Err(_) => ComposeCommand::Unknown(trimmed.to_string()),
        },
        "title" => ComposeCommand::Title(rest.to_string()),
        "load" => match rest.split_once(char::is_whitespace) {
            Some(("names", names)) => ComposeCommand::LoadNames(
                names
                    .split(',')
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty())
                    .collect(),
            ),
            Some(("query", phrase)) => ComposeCommand::LoadQuery(phrase.trim().to_string()),
            _ => ComposeCommand::Unknown(trimmed.to_string()),
        },
        "export" | "e" => {
            if rest.is_empty() {
                ComposeCommand::Export(None)
            } else {
                ComposeCommand::Export(Some(rest.to_string()))
            }
        }
        "help" | "h" | "?" => ComposeCommand::Help,
        "quit" | "q" | "exit" => ComposeCommand::Quit,
        _ => ComposeCommand::Unknown(trimmed.to_string()),
    }
}

const HELP: &str = "\
Commands:
  list                 Show pages visible under the filter
  sel                  Show the selection in export order
  toggle <id>          Toggle selection membership of a page
  all                  Select everything visible (replaces the selection)
  none                 Clear the selection
  move <from> <to>     Move a selected page to another page's slot
  filter [text]        Set or clear the free-text filter
  tag <id> [text]      Edit the tag draft for a page (local only)
  save <id>            Commit the tag draft for a page
  title [text]         Set or clear the export title
  load names <a,b>     Load pages of the named documents
  load query <phrase>  Load pages matching a search phrase
  export [filename]    Compile the selection into a downloadable file
  quit                 Leave the session";

/// Run the interactive loop until `quit` or end of input
///
/// # Errors
///
/// Returns `PagedeckError` only for I/O failures on stdin/stdout; every
/// backend failure is reported inline and the loop continues.
pub fn run(
    session: &mut WorkSession,
    surface: ExportSurface,
    download_dir: &Path,
    quiet: bool,
) -> Result<(), PagedeckError> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    if !quiet {
        println!("Compose session. Type 'help' for commands.");
        print_status(session);
    }

    loop {
        print!("pagedeck> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };

        match parse_command(&line?) {
            ComposeCommand::List => {
                let visible = session.visible();
                if visible.is_empty() {
                    let message = if session.store().load_failed() {
                        "Loading failed; showing nothing."
                    } else {
                        "No pages found."
                    };
                    println!("{message}");
                }
                for record in visible {
                    let selected = session.selection().contains(record.page_id);
                    println!("{}", output::page_line(record, selected, quiet));
                }
            }
            ComposeCommand::ShowSelection => {
                if session.selection().is_empty() {
                    println!("Nothing selected.");
                }
                for (position, id) in session.selection().ids().iter().enumerate() {
                    if let Some(record) = session.store().get(*id) {
                        println!(
                            "  {}. #{} {} - page {}",
                            position + 1,
                            record.page_id,
                            record.pdf_name,
                            record.page_number
                        );
                    }
                }
            }
            ComposeCommand::Toggle(id) => {
                session.toggle(id);
                if !quiet {
                    print_status(session);
                }
            }
            ComposeCommand::SelectAll => {
                session.select_all();
                if !quiet {
                    print_status(session);
                }
            }
            ComposeCommand::DeselectAll => {
                session.deselect_all();
                if !quiet {
                    print_status(session);
                }
            }
            ComposeCommand::Move(from, to) => {
                session.reorder(from, to);
                if !quiet {
                    print_status(session);
                }
            }
            ComposeCommand::Filter(filter) => {
                session.set_filter(filter);
                if !quiet {
                    println!("{} page(s) visible.", session.visible().len());
                }
            }
            ComposeCommand::TagDraft(id, text) => {
                session.set_draft(id, text);
            }
            ComposeCommand::Save(id) => {
                // Fire-and-forget; failures are logged by the task itself
                if session.save_tags(id).is_none() {
                    println!("No page {id} in the current listing.");
                } else if !quiet {
                    println!("Saving tags for page {id}...");
                }
            }
            ComposeCommand::Title(title) => {
                session.set_title(title);
            }
            ComposeCommand::LoadNames(names) => {
                if names.is_empty() {
                    println!("No document names given.");
                    continue;
                }
                let query = if names.len() == 1 {
                    QueryDescriptor::Document(names[0].clone())
                } else {
                    QueryDescriptor::Documents(names)
                };
                load_into(session, query, quiet);
            }
            ComposeCommand::LoadQuery(phrase) => {
                if phrase.is_empty() {
                    println!("No search phrase given.");
                    continue;
                }
                load_into(
                    session,
                    QueryDescriptor::Phrase {
                        query: phrase,
                        tag: None,
                    },
                    quiet,
                );
            }
            ComposeCommand::Export(filename) => {
                match session.export(filename.as_deref().unwrap_or(""), surface, download_dir) {
                    Ok(ExportOutcome::Saved(path)) => {
                        println!(
                            "Exported {} page(s) to {}",
                            session.selection().len(),
                            path.display()
                        );
                    }
                    Ok(ExportOutcome::NothingSelected) => {
                        println!("Nothing selected; no export request sent.");
                    }
                    Err(err) => {
                        // Selection is kept; the user may simply retry
                        eprintln!("Export failed: {err}");
                    }
                }
            }
            ComposeCommand::Help => println!("{HELP}"),
            ComposeCommand::Quit => break,
            ComposeCommand::Empty => {}
            ComposeCommand::Unknown(line) => {
                println!("Unrecognized command: '{line}'. Type 'help' for commands.");
            }
        }
    }

    Ok(())
}

fn load_into(session: &mut WorkSession, query: QueryDescriptor, quiet: bool) {
    let description = query.describe();
    match session.load(query) {
        Ok(0) => println!("No pages found for {description}."),
        Ok(count) => {
            if !quiet {
                println!("Loaded {count} page(s) for {description}.");
            }
        }
        Err(err) => {
            // Previous snapshot (if any) stays visible
            eprintln!("Failed to load {description}: {err}");
        }
    }
}

fn print_status(session: &WorkSession) {
    println!(
        "{} page(s) loaded, {} visible, {} selected.",
        session.store().records().len(),
        session.visible().len(),
        session.selection().len()
    );
}
