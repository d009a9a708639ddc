/// Merge and deduplication of solutions from all workers
pub mod aggregate;
/// Worker pool that solves partitioned instances
pub mod dispatch;
/// Dancing-links incidence matrix with reversible cover and uncover
pub mod matrix;
/// Per-item partitioning and pre-flight validation
pub mod partition;
/// Request and response messages between dispatcher and workers
pub mod protocol;
/// Backtracking exact-cover search with progress pulses
pub mod search;
