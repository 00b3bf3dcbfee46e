//! Error types for life_sim.

use golife::{Cell, EngineError};
use thiserror::Error;

/// Advancing the simulation failed; the clock keeps its last good snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdvanceError {
    /// The automaton engine could not compute the next generation.
    #[error("engine failed: {0}")]
    Engine(#[from] EngineError),

    /// The generation counter cannot be incremented.
    #[error("generation counter overflow at {0}")]
    GenerationOverflow(u64),

    /// The engine panicked while computing.
    #[error("engine task aborted: {0}")]
    Aborted(String),
}

/// Viewport problems. Both are recovered locally and never reach the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ViewError {
    /// The drawing surface has zero area.
    #[error("surface has zero area")]
    NotDrawable,

    /// The min corner lies beyond the max corner.
    #[error("invalid viewport: min {min} exceeds max {max}")]
    InvalidViewport {
        /// Requested min corner.
        min: Cell,
        /// Requested max corner.
        max: Cell,
    },
}

/// Step driver errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// Single steps are only accepted while stopped.
    #[error("cannot single-step while running")]
    Running,

    /// The advance itself failed.
    #[error(transparent)]
    Advance(#[from] AdvanceError),
}
