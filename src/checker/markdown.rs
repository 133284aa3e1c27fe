// src/checker/markdown.rs
// =============================================================================
// This module turns the lines of a catalog README into a Document.
//
// The catalog has one fixed layout, so we don't need a full markdown parser.
// Each section looks like this:
//
//   ### Animals
//   | API | Description | Auth | HTTPS | CORS |      <- skipped
//   |---|---|---|---|---|                           <- skipped
//   | [Cat API](https://cat.example) | Cats | No | Yes | Yes |
//   | [Dog API](https://dog.example) | Dogs | No | No | No |
//   Back to Index
//
// Rows that don't fit the layout are dropped without an error.
//
// Rust concepts:
// - Slices and iterators: walking the lines once with an index
// - Option<T> and the ? operator: bailing out of a malformed row early
// - Generics: parse() accepts &[String], &[&str], etc. through AsRef<str>
// =============================================================================

use super::document::{Document, Entry, Section};
use crate::config::ParserConfig;
use tracing::{debug, trace, warn};

// Parses already-trimmed, non-empty lines into a Document
//
// Walks the lines once:
// 1. A heading line opens a section named after the rest of the line
// 2. The next `rows_to_skip` lines (table header + separator) are skipped
// 3. Every following line up to the sentinel is tried as a table row
// 4. The sentinel line (or the end of input) closes the section
//
// Lines outside any section are ignored.
pub fn parse<S: AsRef<str>>(lines: &[S], config: &ParserConfig) -> Document {
    let mut document = Document::new();
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index].as_ref();

        if let Some(heading) = line.strip_prefix(config.heading_marker.as_str()) {
            let mut section = Section::new(heading.trim());
            index += 1 + config.rows_to_skip;

            while index < lines.len() && !lines[index].as_ref().contains(&config.sentinel) {
                let row = lines[index].as_ref();
                match parse_row(row) {
                    Some(entry) => {
                        if let Some(previous) = section.insert(entry) {
                            warn!(
                                section = section.name(),
                                entry = %previous.name,
                                "duplicate entry name, keeping the later row"
                            );
                        }
                    }
                    None => trace!(row, "skipping malformed row"),
                }
                index += 1;
            }

            debug!(section = section.name(), entries = section.len(), "parsed section");

            let name = section.name().to_string();
            if document.insert(section).is_some() {
                warn!(section = %name, "duplicate section heading, keeping the later one");
            }
        }

        // Moves past the sentinel (or past the heading, for a non-section line)
        index += 1;
    }

    document
}

// Parses a whole text: trims every line and drops blank ones first
pub fn parse_str(text: &str, config: &ParserConfig) -> Document {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    parse(&lines, config)
}

// Parses one table row into an Entry
//
// Splitting on '|' gives [blank, link cell, description, auth, https, cors]
// where the blank is whatever sits before the row's leading pipe.
// Empty cells right after it are tolerated, so `| | [x](y) | ...` works too.
//
// Returns None when:
// - there is no link cell
// - the link cell isn't `[name](url)`
// - fewer than four cells follow the link cell
pub fn parse_row(line: &str) -> Option<Entry> {
    let cells: Vec<&str> = line.split('|').map(str::trim).collect();

    let link_index = 1 + cells.iter().skip(1).position(|cell| !cell.is_empty())?;
    let (name, link) = split_link_cell(cells[link_index])?;

    let meta = cells.get(link_index + 1..link_index + 5)?;

    Some(Entry {
        name,
        link,
        description: meta[0].to_string(),
        auth: meta[1].to_string(),
        https: meta[2].to_string(),
        cors: meta[3].to_string(),
    })
}

// Splits `[name](url)` into (name, url)
//
// The cell must start with '[', end with ')' and contain exactly one "](".
// An empty name is rejected.
fn split_link_cell(cell: &str) -> Option<(String, String)> {
    let inner = cell.strip_prefix('[')?.strip_suffix(')')?;

    let mut parts = inner.split("](");
    let name = parts.next()?;
    let link = parts.next()?;
    if parts.next().is_some() || name.is_empty() {
        return None;
    }

    Some((name.to_string(), link.to_string()))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does `S: AsRef<str>` mean?
//    - parse() works with any slice whose items can be viewed as &str
//    - So both &[String] (lines read from a file) and &[&str] (test data) work
//
// 2. What does .get(a..b) on a slice return?
//    - Some(sub_slice) if the whole range is in bounds, None otherwise
//    - It's the non-panicking version of slice[a..b]
//
// 3. Why strip_prefix / strip_suffix?
//    - They return Some(rest) only if the prefix/suffix is there
//    - Combined with ? they check the shape and cut it off in one step
// -----------------------------------------------------------------------------
