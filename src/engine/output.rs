//! Console printer, output-file writer and error summary.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::HashError;
use crate::types::Digests;
use crate::utils::Colors;

/// One `path: digest` line.
pub fn format_line(path: &Path, digest: &str) -> String {
    format!("{}: {}", path.display(), digest)
}

/// Print a digest line to stdout.
pub fn print_digest(path: &Path, digest: &str) {
    println!("{}", format_line(path, digest));
}

/// Write every entry as a `path: digest` line. Order follows the map (unspecified).
pub fn write_digests<W: Write>(mut out: W, digests: &Digests) -> std::io::Result<()> {
    for (path, digest) in digests {
        writeln!(out, "{}", format_line(path, digest))?;
    }
    out.flush()
}

/// Create (or truncate) `filename` and write the digest table to it.
pub fn write_results_to_file(filename: &Path, digests: &Digests) -> Result<()> {
    let file = File::create(filename)
        .with_context(|| format!("create output file {}", filename.display()))?;
    write_digests(BufWriter::new(file), digests)
        .with_context(|| format!("write output file {}", filename.display()))?;
    log::debug!("wrote {} digests to {}", digests.len(), filename.display());
    Ok(())
}

/// Print the error list to stderr after a run.
pub fn print_errors(errors: &[(PathBuf, HashError)]) {
    if errors.is_empty() {
        return;
    }
    eprintln!("\n{}", Colors::colorize(Colors::FAILED, "Errors encountered:"));
    for (path, err) in errors {
        eprintln!(
            "- error processing file {}: {}",
            Colors::colorize(Colors::PATH, &path.display().to_string()),
            err
        );
    }
}

/// One-line summary of a run.
pub fn summary_line(hashed: usize, failed: usize) -> String {
    format!(
        "{} | {}",
        Colors::colorize(Colors::OK, &format!("Hashed: {}", hashed)),
        Colors::colorize(Colors::FAILED, &format!("Failed: {}", failed))
    )
}
