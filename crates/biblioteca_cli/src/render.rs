//! Text and JSON rendering of catalog records.

use biblioteca_core::{Author, BookWithAuthor};
use serde::Serialize;

/// Output mode selected by the global `--json` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    pub fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Catalog summary printed by `status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub db_path: String,
    pub schema_ready: bool,
    pub authors: usize,
    pub books: usize,
}

pub fn authors(mode: OutputMode, authors: &[Author]) -> Result<String, serde_json::Error> {
    if mode == OutputMode::Json {
        return serde_json::to_string_pretty(authors);
    }
    if authors.is_empty() {
        return Ok("No authors.".to_string());
    }
    let rows = authors
        .iter()
        .map(|author| vec![author.id.to_string(), author.name.clone()])
        .collect::<Vec<_>>();
    Ok(table(&["ID", "NAME"], &rows))
}

pub fn books(mode: OutputMode, books: &[BookWithAuthor]) -> Result<String, serde_json::Error> {
    if mode == OutputMode::Json {
        return serde_json::to_string_pretty(books);
    }
    if books.is_empty() {
        return Ok("No books.".to_string());
    }
    let rows = books
        .iter()
        .map(|book| {
            vec![
                book.id.to_string(),
                book.title.clone(),
                book.author_name.clone(),
            ]
        })
        .collect::<Vec<_>>();
    Ok(table(&["ID", "TITLE", "AUTHOR"], &rows))
}

/// Renders a single record as JSON, or `text` in text mode.
pub fn record<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<String, serde_json::Error> {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(value),
        OutputMode::Text => Ok(text(value)),
    }
}

fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths = headers
        .iter()
        .map(|header| header.chars().count())
        .collect::<Vec<_>>();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_cells = headers
        .iter()
        .map(|header| header.to_string())
        .collect::<Vec<_>>();
    let mut lines = vec![table_line(&widths, &header_cells)];
    lines.extend(rows.iter().map(|row| table_line(&widths, row)));
    lines.join("\n")
}

fn table_line(widths: &[usize], cells: &[String]) -> String {
    let padded = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>();
    padded.join("  ").trim_end().to_string()
}
