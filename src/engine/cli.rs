//! CLI command handler: hash the tree, then print, rename and/or write the results.

use anyhow::{Result, anyhow};
use log::{debug, info, warn};
use std::process::ExitCode;
use std::sync::{Mutex, OnceLock};

use crate::{HashReport, Opts};
use crate::engine::arg_parser::Cli;
use crate::engine::output::{print_digest, print_errors, summary_line, write_results_to_file};
use crate::engine::progress::{BatchedProgress, create_counter};
use crate::engine::rename::rename_to_digest;
use crate::engine::registry::HashAlgorithm;
use crate::pipeline::CancelToken;
use crate::run::hash_dir_with_opts;
use crate::utils::config::PROGRESS_UPDATE_BATCH_SIZE;
use crate::utils::{apply_file_to_opts, load_hashcalc_toml, setup_logging};

/// Build options: defaults, then `.hashcalc.toml` in DIR, then CLI flags.
/// An unknown hash identifier fails here, before any traversal.
pub fn build_opts(cli: &Cli) -> Result<Opts> {
    let mut opts = Opts::default();
    if let Some(file) = load_hashcalc_toml(&cli.dir)? {
        apply_file_to_opts(&file, &mut opts)?;
    }
    if let Some(ref id) = cli.hash {
        opts.algorithm = id.parse::<HashAlgorithm>()?;
    }
    if let Some(ref p) = cli.file_pattern {
        opts.file_pattern = p.clone();
    }
    if let Some(n) = cli.workers {
        opts.num_workers = Some(n as usize);
    }
    if cli.out_file.is_some() {
        opts.out_file = cli.out_file.clone();
    }
    if let Some(v) = cli.rename {
        opts.rename = v;
    }
    if let Some(v) = cli.display {
        opts.display = v;
    }
    if let Some(v) = cli.follow_links {
        opts.follow_links = v;
    }
    if let Some(v) = cli.verbose {
        opts.verbose = v;
    }
    Ok(opts)
}

/// Token the Ctrl+C handler trips. Each run installs its own.
static INTERRUPT_TARGET: Mutex<Option<CancelToken>> = Mutex::new(None);

/// Point Ctrl+C at `cancel`. The OS handler is registered once per process.
fn install_interrupt_handler(cancel: &CancelToken) -> Result<()> {
    static INSTALLED: OnceLock<std::result::Result<(), String>> = OnceLock::new();
    if let Ok(mut target) = INTERRUPT_TARGET.lock() {
        *target = Some(cancel.clone());
    }
    INSTALLED
        .get_or_init(|| {
            ctrlc::set_handler(|| {
                if let Ok(target) = INTERRUPT_TARGET.lock()
                    && let Some(token) = target.as_ref()
                {
                    token.cancel();
                }
            })
            .map_err(|e| e.to_string())
        })
        .clone()
        .map_err(|e| anyhow!("set Ctrl+C handler: {}", e))
}

/// What one CLI run produced.
#[derive(Debug)]
pub struct RunStatus {
    pub report: HashReport,
    /// False when `--out-file` was given and could not be written.
    pub output_written: bool,
    pub cancelled: bool,
}

impl RunStatus {
    /// Success only when every path hashed, the output file (if any) was written and the run
    /// was not cancelled.
    pub fn succeeded(&self) -> bool {
        !self.report.has_failures() && self.output_written && !self.cancelled
    }
}

/// Run one hashing pass and map it to an exit status.
pub fn handle_run(cli: &Cli) -> Result<ExitCode> {
    let status = run_cli(cli)?;
    Ok(if status.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run one hashing pass: print, rename and/or write the results, then report errors.
/// Configuration errors (unknown hash, bad settings file) fail before any traversal.
pub fn run_cli(cli: &Cli) -> Result<RunStatus> {
    let opts = build_opts(cli)?;
    setup_logging(opts.verbose);
    debug!("{} CONFIG:{:#?}", env!("CARGO_PKG_NAME").to_uppercase(), opts);

    let cancel = CancelToken::new();
    install_interrupt_handler(&cancel)?;

    let show = opts.prints_to_console();
    let mut progress = BatchedProgress::new(
        opts.verbose.then(|| create_counter("Hashing")),
        PROGRESS_UPDATE_BATCH_SIZE,
    );

    let report = hash_dir_with_opts(&cli.dir, &opts, cancel.clone(), |result| {
        progress.tick();
        let Some(digest) = result.digest() else {
            return Ok(());
        };
        if opts.rename {
            rename_to_digest(&result.path, digest)?;
        }
        if show {
            print_digest(&result.path, digest);
        }
        Ok(())
    })?;
    progress.finish();

    let mut output_written = true;
    if let Some(ref out) = opts.out_file
        && let Err(e) = write_results_to_file(out, &report.digests)
    {
        eprintln!("Error writing output file: {:#}", e);
        output_written = false;
    }

    print_errors(&report.errors);
    info!("{}", summary_line(report.digests.len(), report.errors.len()));

    let cancelled = cancel.is_cancelled();
    if cancelled {
        warn!("Hashing cancelled by user; results are partial");
    }
    Ok(RunStatus {
        report,
        output_written,
        cancelled,
    })
}
