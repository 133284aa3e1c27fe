// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - document: the Entry / Section / Document model
// - markdown: parses catalog lines into a Document
// - http: probes a single URL (the Prober trait and its reqwest version)
// - validate: probes a whole Document and collects the failures
// =============================================================================

mod document;
mod http;
mod markdown;
mod validate;

// Re-export public items from submodules
// This lets users write `checker::validate()` instead of
// `checker::validate::validate()`
pub use document::{Document, Entry, Section};
pub use http::{FaultKind, HttpProber, ProbeFault, ProbeOutcome, Prober};
pub use markdown::{parse, parse_row, parse_str};
pub use validate::{classify, validate, ErrorDescriptor, FailureRecord};
