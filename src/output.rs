//! Output formatting for CLI display
//!
//! This module provides utilities for formatting page records, document
//! summaries and tags for terminal output.

use colored::Colorize;

use crate::api::{DocumentSummary, PageRecord};

/// Truncate text to `max` characters with an ellipsis, like the page cards
#[must_use]
pub fn snippet(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

/// Format a page record for display
#[must_use]
pub fn page_line(record: &PageRecord, selected: bool, quiet: bool) -> String {
    if quiet {
        return record.page_id.to_string();
    }

    let marker = if selected {
        "[x]".green().to_string()
    } else {
        "[ ]".to_string()
    };
    let tags = if record.tags.is_empty() {
        "no tags".italic().to_string()
    } else {
        record.tags.clone()
    };

    let mut line = format!(
        "  {marker} #{} {} - page {} [{}]\n      {}",
        record.page_id,
        record.pdf_name.bold(),
        record.page_number,
        tags,
        snippet(&record.text, 150),
    );
    if let Some(summary) = &record.vision_summary {
        line.push_str(&format!(
            "\n      {} {}",
            "vision:".dimmed(),
            snippet(summary, 150)
        ));
    }
    line
}

/// Format a document summary for display
#[must_use]
pub fn document_line(doc: &DocumentSummary, quiet: bool) -> String {
    if quiet {
        doc.pdf_name.clone()
    } else if doc.image_heavy_count > 0 {
        format!(
            "  {} ({} page(s), {} image-heavy)",
            doc.pdf_name, doc.page_count, doc.image_heavy_count
        )
    } else {
        format!("  {} ({} page(s))", doc.pdf_name, doc.page_count)
    }
}
