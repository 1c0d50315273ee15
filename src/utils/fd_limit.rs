//! Open-file limit, used to cap the default worker count (Unix).

/// File descriptors budgeted per hashing worker: the file being hashed plus walk handles and slack.
const FDS_PER_WORKER: u64 = 4;

/// Soft `RLIMIT_NOFILE`, or `None` when unlimited or unavailable.
#[cfg(unix)]
fn fd_soft_limit() -> Option<u64> {
    let mut rlim = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, &mut rlim) } != 0 {
        return None;
    }
    if rlim.rlim_cur == libc::RLIM_INFINITY {
        return None;
    }
    u64::try_from(rlim.rlim_cur).ok()
}

#[cfg(not(unix))]
fn fd_soft_limit() -> Option<u64> {
    None
}

/// Default worker ceiling: keep every worker's descriptors within 80% of the soft limit.
/// `None` when there is no limit to respect.
pub fn max_workers_by_fd_limit() -> Option<usize> {
    let usable = fd_soft_limit()?.saturating_mul(4) / 5;
    let workers = (usable / FDS_PER_WORKER).max(1);
    Some(usize::try_from(workers).unwrap_or(usize::MAX))
}
