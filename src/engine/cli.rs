//! CLI command handler: connect, run both stages, print the matches.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::debug;
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::connect;
use crate::classify::{Classifier, KeywordClassifier};
use crate::engine::arg_parser::Cli;
use crate::pipeline::run_scan;
use crate::types::ScanOpts;
use crate::utils::config::default_earliest_date;
use crate::utils::setup_logging;

fn setup_opts(cli: &Cli) -> Result<ScanOpts> {
    setup_logging(cli.verbose);
    let earliest = match &cli.from_date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("--from-date must be a YYYY-MM-DD date")?,
        None => default_earliest_date(),
    };
    Ok(ScanOpts {
        num_workers: cli.workers,
        partitions: cli.partitions,
        fetch_timeout: Duration::from_secs(cli.fetch_timeout),
        earliest,
        progress: !cli.no_progress,
    })
}

/// Connect to the catalog, run enumeration and scan, print `id: title` per
/// match in discovery order, then the completion marker.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let opts = setup_opts(cli)?;
    let classifier: Arc<dyn Classifier> = Arc::new(KeywordClassifier::with_extra(&cli.keywords));
    let client = Arc::new(connect(&cli.host, cli.user.as_deref(), opts.fetch_timeout)?);
    debug!("Scanning catalog at {}...", cli.host);

    let matches = run_scan(client, classifier, &opts)?;

    println!("Possible unwanted items:");
    for m in &matches {
        println!("{}: {}", m.id, m.title);
    }
    println!("done");
    Ok(())
}
