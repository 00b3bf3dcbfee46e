//! Error types for golife.

use crate::grid::Cell;
use thiserror::Error;

/// Errors raised while computing a generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A live cell sits on the edge of the coordinate space, so its
    /// neighbourhood cannot be represented.
    #[error("cell {0} is at the edge of the coordinate space")]
    OutOfBounds(Cell),
}

/// Errors raised while loading an initial population.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Neither a readable file nor a built-in pattern name.
    #[error("pattern source not found: {0}")]
    NotFound(String),

    /// The file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The pattern text does not parse.
    #[error("malformed pattern at line {line}: {reason}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        reason: String,
    },

    /// The RLE header names a rule other than B3/S23.
    #[error("unsupported rule: {0}")]
    UnsupportedRule(String),
}

impl LoadError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed { line, reason: reason.into() }
    }
}
