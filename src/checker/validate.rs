// src/checker/validate.rs
// =============================================================================
// Probes every entry of a Document and collects the failures.
//
// Probes run concurrently, capped at `concurrency` in flight. We use
// futures' buffered() rather than the buffer_unordered() you might expect:
// buffered() still runs up to N probes at once, but yields results in the
// order the probes were started. That order is section order, then entry
// order, so the failure list comes out the same on every run no matter
// which server answers first.
// =============================================================================

use super::document::Document;
use super::http::{ProbeFault, ProbeOutcome, Prober};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// Why a link was reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ErrorDescriptor {
    /// The server answered with a status code >= 400
    Status { code: u16 },
    /// The request failed before any answer came back
    Transport(ProbeFault),
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorDescriptor::Status { code } => write!(f, "{code}"),
            ErrorDescriptor::Transport(fault) => fault.fmt(f),
        }
    }
}

/// One broken link, ready for the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    pub section: String,
    pub name: String,
    pub link: String,
    pub error: ErrorDescriptor,
}

// Maps a probe outcome to an error, or None if the link is fine
//
// - status < 400  -> fine
// - status >= 400 -> Status
// - any fault     -> Transport
pub fn classify(outcome: ProbeOutcome) -> Option<ErrorDescriptor> {
    match outcome {
        ProbeOutcome::Status(code) if code >= 400 => Some(ErrorDescriptor::Status { code }),
        ProbeOutcome::Status(_) => None,
        ProbeOutcome::Fault(fault) => Some(ErrorDescriptor::Transport(fault)),
    }
}

// Probes every entry and returns the failures in document order
//
// `concurrency` is the maximum number of probes in flight; 1 means
// strictly one after another. Values below 1 are treated as 1.
pub async fn validate<P>(document: &Document, prober: &P, concurrency: usize) -> Vec<FailureRecord>
where
    P: Prober + ?Sized,
{
    let total = document.entry_count();
    info!(links = total, concurrency, "probing links");

    let probes = document.sections().flat_map(move |section| {
        section.entries().map(move |entry| async move {
            let outcome = prober.probe(&entry.link).await;
            debug!(section = section.name(), entry = %entry.name, ?outcome, "probed");
            (section, entry, outcome)
        })
    });

    let outcomes: Vec<_> = stream::iter(probes)
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let failures: Vec<FailureRecord> = outcomes
        .into_iter()
        .filter_map(|(section, entry, outcome)| {
            classify(outcome).map(|error| FailureRecord {
                section: section.name().to_string(),
                name: entry.name.clone(),
                link: entry.link.clone(),
                error,
            })
        })
        .collect();

    info!(links = total, broken = failures.len(), "probing finished");
    failures
}
