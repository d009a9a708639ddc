//! Backtracking search over an [`ExactCoverMatrix`] with periodic progress pulses

use crate::algorithm::matrix::{ExactCoverMatrix, NodeIndex};
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

/// Something the search reports to its visitor
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SearchEvent {
    /// The pulse interval elapsed without any other event; carries nothing
    Pulse,
    /// A complete exact cover, as option names
    ///
    /// Forced options come first in the order they were given, followed by
    /// the options chosen by the search in the order it chose them.
    Solution(Vec<String>),
}

/// How a search ended
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SearchOutcome {
    /// Every branch was explored
    Exhausted,
    /// The visitor asked to stop
    Stopped,
    /// A forced option was unknown or already excluded, so nothing was
    /// searched and no event was emitted
    Contradiction {
        /// The first forced option that could not be applied
        option: String,
    },
}

/// Counters collected while searching
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SearchStats {
    /// Recursive steps entered
    pub steps: u64,
    /// Rows tried as the cover of a selected column
    pub rows_tried: u64,
    /// Steps that selected a column with no rows left
    pub dead_ends: u64,
    /// Solutions emitted
    pub solutions: u64,
    /// Progress pulses emitted
    pub pulses: u64,
}

/// Result of [`Search::run`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SearchSummary {
    /// How the search ended
    pub outcome: SearchOutcome,
    /// Counters gathered along the way
    pub stats: SearchStats,
}

/// Decides when a long-running search should emit a progress pulse
#[derive(Clone, Copy, Debug)]
pub struct PulseTimer {
    interval: Duration,
    last: Instant,
}

impl PulseTimer {
    /// Start a timer whose first pulse falls `interval` from now
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Instant::now(),
        }
    }

    /// Whether at least one interval has passed since the last pulse or
    /// reset; when it has, `now` becomes the new reference point
    ///
    /// A zero interval makes every check due.
    pub fn due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }

    /// Restart the interval at `now`
    pub const fn reset(&mut self, now: Instant) {
        self.last = now;
    }
}

/// Single-threaded dancing-links search over one matrix
///
/// The matrix is consumed: forced options are applied destructively and the
/// structure is dropped with the search.
pub struct Search<I> {
    matrix: ExactCoverMatrix<I>,
    /// First node of every row currently in the partial solution, forced
    /// rows first. Grows and shrinks with the recursion depth.
    selected: Vec<NodeIndex>,
    pulse: PulseTimer,
    stats: SearchStats,
}

impl<I> Search<I> {
    /// Prepare a search that pulses at most once per `pulse_interval`
    pub fn new(matrix: ExactCoverMatrix<I>, pulse_interval: Duration) -> Self {
        Self {
            matrix,
            selected: Vec::new(),
            pulse: PulseTimer::new(pulse_interval),
            stats: SearchStats::default(),
        }
    }

    /// Apply the forced options and visit every exact cover
    ///
    /// Each forced name must resolve to a row that is still live; the first
    /// one that doesn't ends the run with [`SearchOutcome::Contradiction`]
    /// before any event is emitted. Valid forced rows are selected in the
    /// order given: their column and every column they touch get covered.
    ///
    /// The visitor sees every [`SearchEvent`] as it happens. Returning
    /// [`ControlFlow::Break`] ends the search with
    /// [`SearchOutcome::Stopped`].
    pub fn run<S, F>(mut self, given_options: &[S], mut visit: F) -> SearchSummary
    where
        S: AsRef<str>,
        F: FnMut(SearchEvent) -> ControlFlow<()>,
    {
        for name in given_options {
            let name = name.as_ref();
            let live_row = self
                .matrix
                .find_row(name)
                .filter(|&row| self.matrix.is_row_live(row));
            let Some(row) = live_row else {
                return SearchSummary {
                    outcome: SearchOutcome::Contradiction {
                        option: name.to_string(),
                    },
                    stats: self.stats,
                };
            };
            self.matrix.cover(self.matrix.column_of(row));
            self.cover_peers(row);
            self.selected.push(row);
        }

        self.pulse.reset(Instant::now());
        let outcome = match self.search(&mut visit) {
            ControlFlow::Continue(()) => SearchOutcome::Exhausted,
            ControlFlow::Break(()) => SearchOutcome::Stopped,
        };
        SearchSummary {
            outcome,
            stats: self.stats,
        }
    }

    fn search<F>(&mut self, visit: &mut F) -> ControlFlow<()>
    where
        F: FnMut(SearchEvent) -> ControlFlow<()>,
    {
        let now = Instant::now();
        self.stats.steps += 1;

        let Some(column) = self.matrix.select_column() else {
            // Every item is covered.
            self.stats.solutions += 1;
            self.pulse.reset(now);
            return visit(SearchEvent::Solution(self.solution()));
        };

        if self.matrix.row_count(column) == 0 {
            self.stats.dead_ends += 1;
            return ControlFlow::Continue(());
        }

        if self.pulse.due(now) {
            self.stats.pulses += 1;
            visit(SearchEvent::Pulse)?;
        }

        self.matrix.cover(column);
        let mut flow = ControlFlow::Continue(());
        let mut row = self.matrix.down(column);
        while row != column && flow.is_continue() {
            self.stats.rows_tried += 1;
            self.selected.push(row);
            self.cover_peers(row);

            flow = self.search(visit);

            self.uncover_peers(row);
            self.selected.pop();
            row = self.matrix.down(row);
        }
        self.matrix.uncover(column);
        flow
    }

    /// Covers the columns of every other node in the row, left to right
    fn cover_peers(&mut self, row: NodeIndex) {
        let mut peer = self.matrix.right(row);
        while peer != row {
            self.matrix.cover(self.matrix.column_of(peer));
            peer = self.matrix.right(peer);
        }
    }

    /// Undoes [`Self::cover_peers`], right to left
    fn uncover_peers(&mut self, row: NodeIndex) {
        let mut peer = self.matrix.left(row);
        while peer != row {
            self.matrix.uncover(self.matrix.column_of(peer));
            peer = self.matrix.left(peer);
        }
    }

    fn solution(&self) -> Vec<String> {
        self.selected
            .iter()
            .filter_map(|&row| self.matrix.row_option(row))
            .map(str::to_string)
            .collect()
    }
}
