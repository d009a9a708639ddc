//! Exact cover by dancing links, partitioned across a pool of worker threads
//!
//! An instance in which exactly one item must stay uncovered is split into
//! one sub-instance per item. Each worker builds its own dancing-links
//! matrix for the sub-instance it is given, and the dispatcher merges the
//! solutions, dropping those already seen in another order.

#![forbid(unsafe_code)]

/// Exact cover matrix, search, partitioning and the worker pool
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;

pub use io::error::{CoverError, Result};
