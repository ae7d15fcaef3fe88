//! Error types for the FTCS solver.

use thiserror::Error;

/// Everything that can stop a run before or during stepping.
#[derive(Error, Debug)]
pub enum FtcsError {
    /// The stability parameter falls outside the open interval (0, 0.5).
    #[error("stability parameter k = {k} is not within bounds (0, 0.5)")]
    Unstable { k: f64 },

    /// Fewer than three cells leaves no interior to evolve.
    #[error("cell_count must be >= 3, got {cell_count}")]
    TooFewCells { cell_count: usize },

    /// A structural grid parameter is out of range.
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// An initial profile does not match the configured grid.
    #[error("initial profile has {actual} cells, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Raised only when the divergence guard is enabled.
    #[error("non-finite value {value} at cell {cell} after step {step}")]
    NonFinite { step: usize, cell: usize, value: f64 },

    /// The snapshot sink refused a snapshot.
    #[error("snapshot sink failed: {0}")]
    Sink(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FtcsError>;
