// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every flag is optional:
// - no --file: look for README.md next to the working directory
// - no --output: write error_report_<today>.txt
// - --timeout / --concurrency / --user-agent override the config file
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "catalog-link-checker",
    version = "0.1.0",
    about = "Find broken links in a markdown API catalog",
    long_about = "catalog-link-checker reads a README made of `###` sections with link tables, \
                  probes every link and writes a markdown report of the ones that fail. \
                  It exits with 0 when every link works, 1 when a report was written and 2 on errors."
)]
pub struct Cli {
    /// Path to the catalog README.md
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Where to save the error report
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// TOML config file (flags below take precedence)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Maximum number of links probed at once (1 = one at a time)
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// User-Agent header sent with every request
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Also print the broken links as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
