use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use testfix::artifact::{AnalysisFile, ArtifactWriter, FixFile};
use testfix::classify::classify;
use testfix::cli::Cli;
use testfix::config::Config;
use testfix::error::Error;
use testfix::input::{load_report, read_piped_stdin};
use testfix::locator::Locator;
use testfix::render::{RenderOptions, render_summary};

const USAGE: &str = "\
Usage:
  testfix <report file>            read a report file (Windows paths are translated)
  cat report.json | testfix        read the report from standard input
  testfix '{\"tests\":[...]}'        pass the report as literal JSON

Example:
  testfix comprehensive-test-report-1772303837033.json";

fn init_logging() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let config = match Config::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    debug!(?config, "config loaded");

    let locator = Locator::new(config.mount_root.clone(), config.search_dir.clone());
    let loaded = match load_report(cli.input.as_deref(), &locator, read_piped_stdin) {
        Ok(l) => l,
        Err(Error::ReportNotFound(what)) => {
            println!("❌ Cannot read test report: {what}");
            println!();
            println!("{USAGE}");
            std::process::exit(1);
        }
        Err(e) => {
            println!("❌ Cannot read test report: {e}");
            std::process::exit(1);
        }
    };

    let classification = classify(&loaded.report);
    info!(
        source = %loaded.source,
        failed = classification.failed.len(),
        skipped = classification.skipped.len(),
        "report classified"
    );

    print!(
        "{}",
        render_summary(&loaded, &classification, RenderOptions::from(&config))
    );

    let writer = ArtifactWriter::new(&config.results_dir);
    let stem = loaded.source.artifact_stem();

    let analysis = AnalysisFile::build(&loaded, &classification);
    if let Err(e) = writer.write_analysis(&stem, &analysis) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    if classification.failed.is_empty() {
        return;
    }

    let fixes = FixFile::build(&loaded, &classification, config.fix_limit);
    match writer.write_fixes(&stem, &fixes) {
        Ok(path) => {
            println!("✅ Fix suggestions saved: {}", path.display());
            println!();
            println!("Next steps:");
            println!("1. Review the suggestions above");
            println!("2. Apply them to the matching test functions");
            println!("3. Re-run the tests to verify the fixes");
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }

    if config.fail_on_failures {
        std::process::exit(1);
    }
}
