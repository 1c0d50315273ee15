//! Hashcalc CLI: hash files under a directory with a worker pool.

use anyhow::Result;
use clap::Parser;
use hashcalc::engine::arg_parser::Cli;
use hashcalc::engine::handle_run;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> Result<ExitCode> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    let code = handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(code)
}
