use clap::Parser;
use std::path::PathBuf;

use crate::utils::config::DEFAULT_DIR;

/// Concurrent file hasher.
#[derive(Clone, Debug, Parser)]
#[command(name = "hashcalc", version)]
#[command(about = "Hash files under a directory in parallel; print, store or rename by digest.")]
pub struct Cli {
    /// Directory to search. Default: current directory.
    #[arg(value_name = "DIR", default_value = DEFAULT_DIR)]
    pub dir: PathBuf,

    /// File name pattern (glob) to hash. Default: `*`.
    #[arg(long, short = 'p')]
    pub file_pattern: Option<String>,

    /// Hash type: MD5, SHA1, SHA256, XXHASH64, BLAKE3. Default: MD5.
    #[arg(long = "hash", short = 'H', value_name = "HASH")]
    pub hash: Option<String>,

    /// File to store the results as `path: digest` lines. Suppresses console output.
    #[arg(long, short = 'o')]
    pub out_file: Option<PathBuf>,

    /// Rename files to their hash value (keeps the extension).
    #[arg(long, short = 'r', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub rename: Option<bool>,

    /// Display hash values. Default: true.
    #[arg(long, short = 'd', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub display: Option<bool>,

    /// Number of worker threads. Default: available parallelism.
    #[arg(long, short = 'w', value_parser = clap::value_parser!(u64).range(1..))]
    pub workers: Option<u64>,

    /// Follow symbolic links.
    #[arg(long, short = 'f', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub follow_links: Option<bool>,

    /// Verbose output (debug logs and a progress counter).
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}
