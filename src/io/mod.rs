//! Command line, configuration, word-list ingestion and terminal output

/// Command-line parsing and solve orchestration
pub mod cli;
/// Solver constants and runtime configuration
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Terminal progress bar
pub mod progress;
/// Word-list reading and normalization
pub mod words;
