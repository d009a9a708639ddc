//! Solver constants and runtime configuration defaults

use crate::io::error::{Result, invalid_parameter};
use std::time::Duration;

// Search pacing
/// Minimum wall-clock time between two progress pulses of one search
pub const DEFAULT_PULSE_INTERVAL_MS: u64 = 50;

// Worker pool sizing
/// Worker count assumed when hardware parallelism cannot be detected
pub const FALLBACK_CONCURRENCY: usize = 8;
/// How long the dispatcher waits for a response before checking worker health
pub const DISPATCH_POLL_MS: u64 = 100;

// Word ingestion
/// Length of the words that become options
pub const WORD_LENGTH: usize = 5;

/// Letters forming the item universe
pub const ALPHABET: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Maximum number of word lists accepted on the command line
pub const MAX_WORD_LISTS: usize = 2;

// Output settings
/// Separator between option names in a canonical solution key
pub const CANONICAL_KEY_SEPARATOR: &str = ",";
/// Separator between words of a displayed solution
pub const DISPLAY_SEPARATOR: &str = ", ";
/// Separator between anagrams that share one normalized word
pub const ANAGRAM_SEPARATOR: &str = "/";

// Progress bar display settings
/// Redraw period of the progress bar
pub const PROGRESS_TICK_MS: u64 = 60;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Runtime parameters for one partitioned solve
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveConfig {
    /// Requested number of concurrent workers
    pub concurrency: usize,
    /// Minimum time between progress pulses inside each search
    pub pulse_interval: Duration,
    /// Option names forced into every solution, in application order
    pub given_options: Vec<String>,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            concurrency: available_concurrency(),
            pulse_interval: Duration::from_millis(DEFAULT_PULSE_INTERVAL_MS),
            given_options: Vec::new(),
        }
    }
}

impl SolveConfig {
    /// Set the requested worker count
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the progress pulse interval
    #[must_use]
    pub fn with_pulse_interval(mut self, pulse_interval: Duration) -> Self {
        self.pulse_interval = pulse_interval;
        self
    }

    /// Set the forced option names
    #[must_use]
    pub fn with_given_options<S: Into<String>>(
        mut self,
        given_options: impl IntoIterator<Item = S>,
    ) -> Self {
        self.given_options = given_options.into_iter().map(Into::into).collect();
        self
    }

    /// Check parameters before any work is dispatched
    ///
    /// # Errors
    ///
    /// Returns an error if the requested concurrency is zero
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(invalid_parameter(
                "concurrency",
                &self.concurrency,
                &"at least one worker is required",
            ));
        }
        Ok(())
    }

    /// Number of workers actually used: the requested count capped by
    /// hardware parallelism, never below one
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.min(available_concurrency()).max(1)
    }
}

/// Hardware parallelism of the host, or [`FALLBACK_CONCURRENCY`] when the
/// platform reports nothing useful
pub fn available_concurrency() -> usize {
    match num_cpus::get() {
        0 => FALLBACK_CONCURRENCY,
        n => n,
    }
}
