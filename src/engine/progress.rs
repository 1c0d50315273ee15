//! Progress counter for verbose runs (total is unknown while the walk is running).

use kdam::{Animation, Bar, BarExt};
use std::sync::{Arc, Mutex};

pub type ProgressBar = Arc<Mutex<Bar>>;

/// Create a counter for unknown total (shows count without percentage)
pub fn create_counter(desc: &'static str) -> ProgressBar {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = 0,
        desc = desc,
        animation = Animation::Classic,
        position = 0,
        unit = " files"
    )))
}

/// Update progress bar if available
/// Uses try_lock to avoid blocking if mutex is contended (non-blocking)
pub fn update_progress_bar(pb: &ProgressBar, n: usize) {
    if let Ok(mut pb) = pb.try_lock() {
        let _ = pb.update(n);
    }
}

/// Force a refresh of the bar (e.g. so counter shows "0 files" immediately).
pub fn refresh_bar(pb: &ProgressBar) {
    if let Ok(mut bar) = pb.try_lock() {
        let _ = bar.refresh();
    }
}

/// Counts results and pushes them to the bar every `batch` items.
pub struct BatchedProgress {
    bar: Option<ProgressBar>,
    pending: usize,
    batch: usize,
}

impl BatchedProgress {
    pub fn new(bar: Option<ProgressBar>, batch: usize) -> Self {
        if let Some(ref b) = bar {
            refresh_bar(b);
        }
        Self {
            bar,
            pending: 0,
            batch: batch.max(1),
        }
    }

    pub fn tick(&mut self) {
        let Some(ref bar) = self.bar else {
            return;
        };
        self.pending += 1;
        if self.pending >= self.batch {
            update_progress_bar(bar, self.pending);
            self.pending = 0;
        }
    }

    /// Flush the remainder and end the bar's line.
    pub fn finish(mut self) {
        if let Some(bar) = self.bar.take() {
            if self.pending > 0 {
                update_progress_bar(&bar, self.pending);
            }
            if let Ok(mut b) = bar.lock() {
                let _ = b.refresh();
            }
            eprintln!();
        }
    }
}
