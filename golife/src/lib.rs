//! Conway's Game of Life on an unbounded plane: cell sets, the B3/S23 rule,
//! and pattern loading (RLE, plaintext, built-ins).

pub mod error;
pub mod grid;
pub mod load;
pub mod parse;
pub mod patterns;
pub mod rule;

pub use error::{EngineError, LoadError};
pub use grid::{Cell, Coord, Population};
pub use load::{load, load_or_default};
pub use rule::{Automaton, Conway};
