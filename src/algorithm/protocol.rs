//! Messages exchanged between the dispatcher and its workers
//!
//! On the wire a request reads `{"type": "solve", "options": {...}}` and the
//! worker answers with any number of `{"type": "solution", "solution": [...]}`
//! followed by exactly one `{"type": "completed"}`.

use crate::algorithm::matrix::{ExactCoverMatrix, Item, OptionMap};
use crate::algorithm::search::{Search, SearchEvent, SearchOutcome};
use crate::io::error::Result;
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;
use std::time::Duration;

/// Work sent to a worker
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkerRequest<I> {
    /// Enumerate every exact cover of an option map
    Solve {
        /// Options keyed by name
        options: OptionMap<I>,
        /// Universe of the matrix; empty means the items the options mention
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        items: Vec<I>,
        /// Option names forced into every solution
        #[serde(
            default,
            rename = "givenOptions",
            skip_serializing_if = "Vec::is_empty"
        )]
        given_options: Vec<String>,
    },
}

/// Answer streamed back by a worker
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkerResponse {
    /// One exact cover, as option names in emission order
    Solution {
        /// Option names, forced ones first
        solution: Vec<String>,
    },
    /// The request has been fully processed
    Completed,
}

/// Process one request, streaming every response through `respond`
///
/// Solutions are forwarded as they are found and [`WorkerResponse::Completed`]
/// follows once the search is exhausted. A contradictory forced option ends
/// the search before any solution, so the worker reports completion with no
/// solutions at all. `on_pulse` runs at every progress pulse of the search.
///
/// Either callback may return [`ControlFlow::Break`] to abandon the request;
/// the outcome is then [`SearchOutcome::Stopped`] and no completion is sent.
///
/// # Errors
///
/// Returns an error if the matrix cannot be built from the request, in
/// which case nothing has been sent
pub fn serve<I, R, P>(
    request: WorkerRequest<I>,
    pulse_interval: Duration,
    mut respond: R,
    mut on_pulse: P,
) -> Result<SearchOutcome>
where
    I: Item,
    R: FnMut(WorkerResponse) -> ControlFlow<()>,
    P: FnMut() -> ControlFlow<()>,
{
    let WorkerRequest::Solve {
        options,
        items,
        given_options,
    } = request;

    let matrix = if items.is_empty() {
        ExactCoverMatrix::from_options(&options)?
    } else {
        ExactCoverMatrix::new(&items, &options)?
    };

    let summary = Search::new(matrix, pulse_interval).run(&given_options, |event| match event {
        SearchEvent::Pulse => on_pulse(),
        SearchEvent::Solution(solution) => respond(WorkerResponse::Solution { solution }),
    });

    Ok(match summary.outcome {
        SearchOutcome::Stopped => SearchOutcome::Stopped,
        outcome => match respond(WorkerResponse::Completed) {
            ControlFlow::Continue(()) => outcome,
            ControlFlow::Break(()) => SearchOutcome::Stopped,
        },
    })
}
