// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Build the config (defaults <- config file <- flags) and set up logging
// 3. Read the catalog, probe every link, write the report if needed
// 4. Exit with proper code (0 = all good, 1 = broken links, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use catalog_link_checker::checker::{FailureRecord, HttpProber};
use catalog_link_checker::config::{self, Config};
use catalog_link_checker::report::{timestamped_report_name, FileSink};
use catalog_link_checker::source::{default_input_path, read_lines};
use catalog_link_checker::{pipeline, CheckerError, RunOutcome};
use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("❌ Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = no broken links
//   Ok(1) = broken links found, report written
//   Err   = could not read the catalog, config or write the report
async fn run(cli: Cli) -> Result<i32> {
    let config = build_config(&cli)?;

    let input = cli
        .file
        .clone()
        .or_else(default_input_path)
        .ok_or(CheckerError::MissingInput)
        .context("use --file to specify the catalog")?;
    let output = cli.output.clone().unwrap_or_else(|| {
        let today = chrono::Local::now().date_naive();
        timestamped_report_name("error_report", today).into()
    });

    println!("🔍 Checking links in {}", input.display());

    let lines = read_lines(&input)?;
    let prober = HttpProber::new(&config.probe).map_err(CheckerError::from)?;
    let mut sink = FileSink::new(&output);

    let outcome = pipeline::run(&lines, &config, &prober, &mut sink).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(outcome.failures())?);
    }

    match outcome {
        RunOutcome::Clean { checked } => {
            println!("✅ All {} links look good. No issues found.", checked);
            Ok(0)
        }
        RunOutcome::Reported { checked, failures } => {
            print_summary(checked, &failures);
            println!(
                "✅ Saved {} broken links to `{}`",
                failures.len(),
                sink.path().display()
            );
            Ok(1)
        }
    }
}

// Defaults, then the config file, then command-line flags
fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(timeout) = cli.timeout {
        config.probe.timeout_secs = timeout;
    }
    if let Some(concurrency) = cli.concurrency {
        config.probe.concurrency = concurrency;
    }
    if let Some(user_agent) = &cli.user_agent {
        config.probe.user_agent = user_agent.clone();
    }

    config::validate(&config).map_err(CheckerError::from)?;
    Ok(config)
}

fn print_summary(checked: usize, failures: &[FailureRecord]) {
    println!();
    for failure in failures {
        println!("   ❌ [{}] {} -> {}", failure.section, failure.name, failure.error);
    }
    println!();
    println!("📊 Summary:");
    println!("   ✅ OK: {}", checked - failures.len());
    println!("   ❌ Broken: {}", failures.len());
    println!("   📋 Total: {}", checked);
}

fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_link_checker=warn"),
            1 => EnvFilter::new("catalog_link_checker=info,warn"),
            2 => EnvFilter::new("catalog_link_checker=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
