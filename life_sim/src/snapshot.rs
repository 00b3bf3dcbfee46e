// snapshot.rs - Immutable view of one generation

use golife::{Cell, Population};

/// The live cells of one generation plus their bounding box.
///
/// Never modified after construction; the clock publishes a fresh one per
/// generation and hands out `Arc`s to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationSnapshot {
    population: Population,
    generation: u64,
    bounds: Option<(Cell, Cell)>,
}

impl PopulationSnapshot {
    pub fn new(population: Population, generation: u64) -> Self {
        let bounds = population.bounding_box();
        Self { population, generation, bounds }
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cell_count(&self) -> usize {
        self.population.len()
    }

    /// Min and max corner of the live cells, `None` when nothing is alive.
    pub fn bounds(&self) -> Option<(Cell, Cell)> {
        self.bounds
    }
}
