//! Order-independent merge of solutions arriving from many workers

use crate::io::configuration::{CANONICAL_KEY_SEPARATOR, DISPLAY_SEPARATOR};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A deduplicated solution as shown to the user: display names, sorted
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DisplaySolution(Vec<String>);

impl DisplaySolution {
    /// The display names in sorted order
    pub fn names(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for DisplaySolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(DISPLAY_SEPARATOR))
    }
}

/// Collects solutions, keeping the first arrival of each distinct set of
/// option names
#[derive(Clone, Debug, Default)]
pub struct ResultAggregator {
    /// Option name to display name; unmapped names display as themselves
    display_names: HashMap<String, String>,
    seen: HashSet<String>,
    solutions: Vec<DisplaySolution>,
}

impl ResultAggregator {
    /// Aggregator that displays option names unchanged
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregator that maps option names through `display_names`
    pub fn with_display_names(display_names: HashMap<String, String>) -> Self {
        Self {
            display_names,
            ..Self::default()
        }
    }

    /// The order-independent key of a solution: its sorted option names,
    /// comma-joined
    pub fn canonical_key(solution: &[String]) -> String {
        let mut names = solution.to_vec();
        names.sort();
        names.join(CANONICAL_KEY_SEPARATOR)
    }

    /// Record a solution
    ///
    /// Returns the new display entry, or [`None`] when a solution with the
    /// same canonical key was already recorded.
    pub fn record(&mut self, solution: Vec<String>) -> Option<&DisplaySolution> {
        if !self.seen.insert(Self::canonical_key(&solution)) {
            return None;
        }

        let mut display: Vec<String> = solution
            .into_iter()
            .map(|name| self.display_names.get(&name).cloned().unwrap_or(name))
            .collect();
        display.sort();
        self.solutions.push(DisplaySolution(display));
        self.solutions.last()
    }

    /// Distinct solutions recorded so far
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Display entries in order of first arrival
    pub fn solutions(&self) -> &[DisplaySolution] {
        &self.solutions
    }
}
