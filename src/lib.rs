//! catalog-link-checker: finds broken links in markdown API catalogs
//!
//! A catalog is a README made of `###` sections, each holding a table of
//! `[name](url)` rows. The crate parses that layout into a
//! [`checker::Document`], probes every link over HTTP and writes a
//! markdown report of the ones that fail.

pub mod checker;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod source;

pub use config::Config;
pub use error::{CheckerError, ConfigError, Result};
pub use pipeline::{run, RunOutcome};
