// rule.rs - Conway's B3/S23 rule on an unbounded plane

use std::collections::HashMap;

use crate::error::EngineError;
use crate::grid::{Cell, Population};

/// Computes generation N+1 from generation N.
///
/// Implementations must be pure: the input is never modified and no state
/// visible to the caller is shared between calls.
pub trait Automaton: Send + Sync {
    fn next_generation(&self, current: &Population) -> Result<Population, EngineError>;
}

const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// Standard Life: birth on 3, survival on 2 or 3.
#[derive(Debug, Clone, Copy, Default)]
pub struct Conway;

impl Automaton for Conway {
    fn next_generation(&self, current: &Population) -> Result<Population, EngineError> {
        let mut counts: HashMap<Cell, u8> = HashMap::with_capacity(current.len() * 8);

        for &cell in current {
            for &(dx, dy) in &NEIGHBOURS {
                let x = cell.x.checked_add(dx).ok_or(EngineError::OutOfBounds(cell))?;
                let y = cell.y.checked_add(dy).ok_or(EngineError::OutOfBounds(cell))?;
                *counts.entry(Cell::new(x, y)).or_insert(0) += 1;
            }
        }

        let next = counts
            .into_iter()
            .filter(|&(cell, count)| match (current.contains(&cell), count) {
                (true, 2) | (true, 3) => true, // Survival
                (false, 3) => true,            // Birth
                _ => false,                    // Death or stays dead
            })
            .map(|(cell, _)| cell)
            .collect();

        Ok(next)
    }
}
