pub mod config;
pub mod fd_limit;
pub mod hashcalc_toml;
pub mod logger;

pub use config::*;
pub use fd_limit::max_workers_by_fd_limit;
pub use hashcalc_toml::{HashcalcToml, apply_file_to_opts, load_hashcalc_toml, parse_hashcalc_toml};
pub use logger::{Colors, setup_logging};
