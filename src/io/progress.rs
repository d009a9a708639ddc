//! Terminal progress display for a running solve

use crate::algorithm::dispatch::DispatchProgress;
use crate::io::configuration::{PROGRESS_BAR_WIDTH, PROGRESS_TICK_MS};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] Sub-instances: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single progress bar over the sub-instances of one solve
///
/// Lines printed through [`ProgressManager::suspend`] appear above the bar
/// without being overdrawn.
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Show a bar for `total` sub-instances solved by `workers` threads
    pub fn new(total: usize, workers: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_message(Self::message(workers, 0));
        bar.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MS));
        Self { bar }
    }

    /// Refresh position and message from the dispatcher counters
    pub fn update(&self, progress: &DispatchProgress) {
        self.bar.set_position(progress.completed as u64);
        self.bar
            .set_message(Self::message(progress.in_flight, progress.solutions));
    }

    /// Run `f` with the bar hidden, typically to print a line
    pub fn suspend<R>(&self, f: impl FnOnce() -> R) -> R {
        self.bar.suspend(f)
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn message(working: usize, solutions: usize) -> String {
        format!("{working} working, {solutions} solutions")
    }
}
