//! Error types for grid and cell-type operations.
//!
//! Expected negative outcomes (a move blocked by a bound, a rotation that
//! cannot be solved, a cell rejected by a wrap) are not errors: they are
//! reported through `Option`. [`GridError`] is reserved for calls that
//! are invalid for the grid or configuration they were made on.

use std::fmt;

/// Errors arising from misuse of a grid or cell type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A query that needs a finite bound was made on an unbounded grid.
    GridInfinite,
    /// The operation has no implementation for this grid or symmetry
    /// configuration.
    Unsupported {
        /// Which operation was attempted.
        operation: &'static str,
    },
    /// A bound of one grid family was handed to a grid of another.
    BoundMismatch {
        /// The bound kind the grid works with.
        expected: &'static str,
        /// The bound kind that was supplied.
        found: &'static str,
    },
    /// A constructor parameter is out of range.
    InvalidConfig {
        /// What went wrong.
        reason: String,
    },
    /// A bound was requested for an empty set of cells.
    EmptyCellSet,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridInfinite => write!(f, "grid is unbounded; the query needs a finite bound"),
            Self::Unsupported { operation } => {
                write!(f, "unsupported configuration: {operation}")
            }
            Self::BoundMismatch { expected, found } => {
                write!(f, "bound mismatch: expected {expected} bound, got {found} bound")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid grid configuration: {reason}"),
            Self::EmptyCellSet => write!(f, "cannot compute a bound for an empty cell set"),
        }
    }
}

impl std::error::Error for GridError {}
