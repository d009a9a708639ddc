//! Error types for matrix construction, dispatch and word-list ingestion

use std::fmt;
use std::path::PathBuf;

/// Main error type for all solver operations
#[derive(Debug)]
pub enum CoverError {
    /// Some items of the universe appear in no option
    ///
    /// Detected during pre-flight validation, before any sub-instance is
    /// dispatched. The whole operation is aborted.
    UncoverableItems {
        /// Items that no option covers, in universe order
        items: Vec<String>,
    },

    /// An option refers to an item outside the universe of the matrix
    UnknownItem {
        /// Name of the offending option
        option: String,
        /// The item that has no column
        item: String,
    },

    /// An option lists the same item more than once
    DuplicateItem {
        /// Name of the offending option
        option: String,
        /// The repeated item
        item: String,
    },

    /// An option covers no item at all
    EmptyOption {
        /// Name of the offending option
        option: String,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Reading a word list from disk failed
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Word list input doesn't meet the ingestion requirements
    InvalidWordList {
        /// Description of what's wrong with the input
        reason: String,
    },

    /// A worker thread stopped without reporting completion
    WorkerDisconnected {
        /// Index of the worker in the pool
        worker: usize,
    },

    /// A worker thread panicked; the payload is kept when it was a string
    WorkerPanicked {
        /// Index of the worker in the pool
        worker: usize,
        /// Panic message
        message: String,
    },

    /// The operating system refused to start a worker thread
    WorkerSpawn {
        /// Index of the worker in the pool
        worker: usize,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for CoverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UncoverableItems { items } => {
                write!(f, "Items covered by no option: {}", items.join(", "))
            }
            Self::UnknownItem { option, item } => {
                write!(f, "Option '{option}' refers to unknown item '{item}'")
            }
            Self::DuplicateItem { option, item } => {
                write!(f, "Option '{option}' lists item '{item}' more than once")
            }
            Self::EmptyOption { option } => {
                write!(f, "Option '{option}' covers no items")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidWordList { reason } => {
                write!(f, "Invalid word list: {reason}")
            }
            Self::WorkerDisconnected { worker } => {
                write!(f, "Worker {worker} disconnected before completing its work")
            }
            Self::WorkerPanicked { worker, message } => {
                write!(f, "Worker {worker} panicked: {message}")
            }
            Self::WorkerSpawn { worker, source } => {
                write!(f, "Failed to start worker {worker}: {source}")
            }
        }
    }
}

impl std::error::Error for CoverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } | Self::WorkerSpawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, CoverError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> CoverError {
    CoverError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error for the given path and operation
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> CoverError {
    CoverError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
