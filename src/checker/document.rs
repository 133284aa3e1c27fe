// src/checker/document.rs
// =============================================================================
// The typed model of a parsed catalog.
//
// A catalog is a markdown file made of sections (one per `###` heading),
// and each section lists entries (one per table row). This module holds
// the three types that describe it:
// - Entry: one row (name, link and the metadata columns)
// - Section: the entries under one heading, keyed by name
// - Document: every section, keyed by heading
//
// Both maps keep insertion order, so iterating a Document always yields
// sections and entries in the order they appeared in the file.
// Inserting a name that already exists replaces the old value in place.
// =============================================================================

use serde::Serialize;

/// One cataloged resource (a single table row)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub name: String,
    pub link: String,
    pub description: String,
    pub auth: String,
    pub https: String,
    pub cors: String,
}

/// The entries listed under one heading
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<Entry>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds an entry, replacing any entry with the same name.
    ///
    /// The replacement keeps the original position. Returns the entry
    /// that was replaced, if any.
    pub fn insert(&mut self, entry: Entry) -> Option<Entry> {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => Some(std::mem::replace(existing, entry)),
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A whole parsed catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: Vec<Section>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a section, replacing any section with the same heading.
    ///
    /// Works like `Section::insert`: the replacement keeps the original
    /// position and the old section is returned.
    pub fn insert(&mut self, section: Section) -> Option<Section> {
        match self.sections.iter_mut().find(|s| s.name == section.name) {
            Some(existing) => Some(std::mem::replace(existing, section)),
            None => {
                self.sections.push(section);
                None
            }
        }
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Total number of entries across all sections
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
