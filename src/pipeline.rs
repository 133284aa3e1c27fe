//! The full check: lines → Document → failures → report
//!
//! [`run`] is what the CLI calls. It never fails because of a single bad
//! row or link; the only errors it returns come from the report sink.

use crate::checker::{self, Document, FailureRecord, Prober};
use crate::config::Config;
use crate::error::Result;
use crate::report::{render_report, ReportSink};
use tracing::info;

/// How a completed run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every link answered with a status below 400
    Clean { checked: usize },
    /// Some links failed and the report was handed to the sink
    Reported {
        checked: usize,
        failures: Vec<FailureRecord>,
    },
}

impl RunOutcome {
    pub fn failures(&self) -> &[FailureRecord] {
        match self {
            RunOutcome::Clean { .. } => &[],
            RunOutcome::Reported { failures, .. } => failures,
        }
    }

    pub fn checked(&self) -> usize {
        match self {
            RunOutcome::Clean { checked } | RunOutcome::Reported { checked, .. } => *checked,
        }
    }
}

/// Parses `lines`, probes every entry and writes a report if anything failed.
///
/// The sink is not touched when all links are fine.
pub async fn run<S, P, K>(lines: &[S], config: &Config, prober: &P, sink: &mut K) -> Result<RunOutcome>
where
    S: AsRef<str>,
    P: Prober + ?Sized,
    K: ReportSink + ?Sized,
{
    let document = checker::parse(lines, &config.parser);
    info!(
        sections = document.sections().count(),
        entries = document.entry_count(),
        "parsed catalog"
    );

    check_document(&document, config, prober, sink).await
}

/// Same as [`run`], for a Document that is already parsed
pub async fn check_document<P, K>(
    document: &Document,
    config: &Config,
    prober: &P,
    sink: &mut K,
) -> Result<RunOutcome>
where
    P: Prober + ?Sized,
    K: ReportSink + ?Sized,
{
    let checked = document.entry_count();
    let failures = checker::validate(document, prober, config.probe.concurrency).await;

    if failures.is_empty() {
        return Ok(RunOutcome::Clean { checked });
    }

    sink.write_report(&render_report(&failures))?;
    Ok(RunOutcome::Reported { checked, failures })
}
