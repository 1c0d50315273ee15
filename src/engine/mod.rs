//! Engine module: hashing, algorithm registry, CLI and output collaborators

pub mod arg_parser;
pub mod cli;
pub mod hashing;
pub mod output;
pub mod progress;
pub mod registry;
pub mod rename;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::{RunStatus, build_opts, handle_run, run_cli};
pub use hashing::{Digester, StreamHasher, hex_u64};
pub use output::{format_line, write_digests, write_results_to_file};
pub use registry::{HashAlgorithm, lookup};
pub use rename::rename_to_digest;
pub use tools::{NameFilter, digest_file_name, glob_match, running_as_root};
