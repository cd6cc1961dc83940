//! Catscan CLI: scan a remote catalog for keyword-flagged items.

use anyhow::Result;
use catscan::engine::arg_parser::Cli;
use catscan::engine::handle_run;
use clap::Parser;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
