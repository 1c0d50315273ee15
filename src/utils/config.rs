//! Application configuration constants.
//! Tuning and thresholds in one place.

use std::sync::OnceLock;

use crate::utils::fd_limit::max_workers_by_fd_limit;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    /// Per-directory settings file, e.g. `.hashcalc.toml`.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Defaults ----

/// File pattern used when none is given.
pub const DEFAULT_FILE_PATTERN: &str = "*";

/// Directory hashed when none is given.
pub const DEFAULT_DIR: &str = ".";

// ---- Worker threads ----

/// Worker count limits.
/// Use [`WorkerThreadLimits::current()`] to fill `all_threads` from rayon.
#[derive(Clone, Copy, Debug)]
pub struct WorkerThreadLimits {
    /// Available threads (from rayon); set by [`WorkerThreadLimits::current()`].
    pub all_threads: usize,
    /// Cap from the process FD limit, if there is one.
    pub fd_cap: Option<usize>,
}

impl WorkerThreadLimits {
    pub const FLOOR_THREADS: usize = 1;
    /// Ceiling for any worker count, requested or not. Hashing is I/O bound well before this.
    pub const MAX_THREADS: usize = 256;

    /// Build limits with `all_threads` from `rayon::current_num_threads()` (honors `RAYON_NUM_THREADS`).
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            fd_cap: max_workers_by_fd_limit(),
        }
    }

    /// Worker count for a run: the caller's override, else all threads capped by the FD limit.
    /// Clamped to [`Self::FLOOR_THREADS`]..=[`Self::MAX_THREADS`].
    pub fn resolve(&self, requested: Option<usize>) -> usize {
        let n = match requested {
            Some(n) if n > Self::MAX_THREADS => {
                log::warn!("Requested {} workers; using {}", n, Self::MAX_THREADS);
                n
            }
            Some(n) => n,
            None => match self.fd_cap {
                Some(cap) => self.all_threads.min(cap),
                None => self.all_threads,
            },
        };
        n.clamp(Self::FLOOR_THREADS, Self::MAX_THREADS)
    }
}

// ---- Hashing ----

/// Hashing I/O sizes.
pub struct HashingConsts;

impl HashingConsts {
    /// Chunk size for streaming file contents into the digest (bytes). 1 MB.
    pub const HASH_READ_CHUNK_SIZE: usize = 1024 * 1024;
}

// ---- Channels ----

/// Job and result channel capacity per worker. Bounded so the walk is throttled to hashing speed.
pub struct ChannelCap;

impl ChannelCap {
    pub const PER_WORKER: usize = 64;
    pub const MIN: usize = 256;
    /// Bounded channels allocate every slot up front.
    pub const MAX: usize = 16 * 1024;

    pub fn for_workers(num_workers: usize) -> usize {
        num_workers
            .saturating_mul(Self::PER_WORKER)
            .clamp(Self::MIN, Self::MAX)
    }
}

// ---- Progress ----

/// Results between progress counter refreshes.
pub const PROGRESS_UPDATE_BATCH_SIZE: usize = 100;
