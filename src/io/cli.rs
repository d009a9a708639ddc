//! Command-line interface for solving a word list

use crate::algorithm::aggregate::ResultAggregator;
use crate::algorithm::dispatch::{DispatchEvent, Dispatcher, SolveReport};
use crate::io::configuration::{DEFAULT_PULSE_INTERVAL_MS, SolveConfig, available_concurrency};
use crate::io::error::{CoverError, Result, invalid_parameter};
use crate::io::progress::ProgressManager;
use crate::io::words::{NormalizedWords, normalize_word, read_word_lists, universe};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "wordlinks")]
#[command(
    author,
    version,
    about = "Find sets of five-letter words that share no letter, leaving one letter unused"
)]
/// Command-line arguments for the word-set solver
pub struct Cli {
    /// Word list, one word per line; give two lists to solve their intersection
    #[arg(value_name = "WORD_LIST", required = true, num_args = 1..=2)]
    pub word_lists: Vec<PathBuf>,

    /// Number of worker threads, capped by available parallelism
    #[arg(short, long, default_value_t = available_concurrency())]
    pub concurrency: usize,

    /// Word that every solution must contain (repeatable)
    #[arg(short, long = "given", value_name = "WORD")]
    pub given: Vec<String>,

    /// Minimum milliseconds between progress checks inside a search
    #[arg(long, default_value_t = DEFAULT_PULSE_INTERVAL_MS)]
    pub pulse_ms: u64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Build the solve configuration, normalizing every given word
    ///
    /// # Errors
    ///
    /// Returns an error if a given word is not five different lowercase letters
    pub fn solve_config(&self) -> Result<SolveConfig> {
        let given = self
            .given
            .iter()
            .map(|word| {
                let word = word.trim().to_lowercase();
                normalize_word(&word).ok_or_else(|| {
                    invalid_parameter("given", &word, &"expected five different letters a-z")
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SolveConfig::default()
            .with_concurrency(self.concurrency)
            .with_pulse_interval(Duration::from_millis(self.pulse_ms))
            .with_given_options(given))
    }
}

/// Reads the word lists, runs the dispatcher and prints every solution
pub struct WordSolver {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl WordSolver {
    /// Create a solver for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self {
            cli,
            progress_manager: None,
        }
    }

    /// Solve according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A word list cannot be read or the arguments are invalid
    /// - Some letter appears in no accepted word
    /// - A worker thread fails
    #[allow(clippy::print_stdout)]
    pub fn process(&mut self) -> Result<SolveReport> {
        let words = NormalizedWords::from_words(&read_word_lists(&self.cli.word_lists)?);
        let stats = words.stats();
        println!(
            "{} words, {} five-letter words, {} normalized words",
            stats.total_words, stats.five_letter_words, stats.normalized_words
        );
        let missing = words.missing_letters();
        if !missing.is_empty() {
            return Err(CoverError::UncoverableItems {
                items: missing.iter().map(char::to_string).collect(),
            });
        }

        let dispatcher = Dispatcher::new(self.cli.solve_config()?)?;
        let aggregator = ResultAggregator::with_display_names(words.display_names().clone());
        let report = dispatcher.run(&universe(), words.options(), aggregator, |event| {
            self.observe(&event);
        });

        if let Some(pm) = self.progress_manager.take() {
            pm.finish();
        }
        let report = report?;
        println!(
            "{} solutions in {:.2} seconds",
            report.aggregator.len(),
            report.elapsed.as_secs_f64()
        );
        for failure in &report.failures {
            println!("Sub-instance skipped: {failure}");
        }
        Ok(report)
    }

    #[allow(clippy::print_stdout)]
    fn observe(&mut self, event: &DispatchEvent<'_>) {
        match event {
            DispatchEvent::Started { total, workers } => {
                if self.cli.should_show_progress() {
                    self.progress_manager = Some(ProgressManager::new(*total, *workers));
                }
            }
            DispatchEvent::Solution(solution) => match self.progress_manager {
                Some(ref pm) => pm.suspend(|| println!("{solution}")),
                None => println!("{solution}"),
            },
            DispatchEvent::Progress(progress) | DispatchEvent::Finished(progress) => {
                if let Some(ref pm) = self.progress_manager {
                    pm.update(progress);
                }
            }
        }
    }
}
