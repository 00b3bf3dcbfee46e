// clock.rs - Generation state and copy-on-advance publication

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use golife::{Automaton, Population};

use crate::error::AdvanceError;
use crate::snapshot::PopulationSnapshot;

/// Owns the current generation.
///
/// Readers get an `Arc` to an immutable snapshot. Advances are serialized by
/// `advance_lock`; the next generation is computed without holding the
/// publish lock, then swapped in as a whole, so a reader either sees the old
/// snapshot or the new one and never anything in between.
pub struct SimulationClock {
    engine: Box<dyn Automaton>,
    current: RwLock<Arc<PopulationSnapshot>>,
    advance_lock: Mutex<()>,
}

impl SimulationClock {
    pub fn new(engine: Box<dyn Automaton>, initial: Population) -> Self {
        Self {
            engine,
            current: RwLock::new(Arc::new(PopulationSnapshot::new(initial, 0))),
            advance_lock: Mutex::new(()),
        }
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> Arc<PopulationSnapshot> {
        // The guarded value is always a whole Arc, so a poisoned lock is still valid.
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Computes and publishes the next generation.
    ///
    /// On error nothing is published and the previous snapshot stays current.
    pub fn advance(&self) -> Result<Arc<PopulationSnapshot>, AdvanceError> {
        let _serial = self.advance_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let current = self.snapshot();
        let generation = current
            .generation()
            .checked_add(1)
            .ok_or(AdvanceError::GenerationOverflow(current.generation()))?;
        let population = self.engine.next_generation(current.population())?;

        let next = Arc::new(PopulationSnapshot::new(population, generation));
        self.publish(next.clone());
        tracing::trace!(generation, cells = next.cell_count(), "advanced");
        Ok(next)
    }

    /// Replaces the population and restarts at generation 0.
    pub fn reset(&self, population: Population) -> Arc<PopulationSnapshot> {
        let _serial = self.advance_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let fresh = Arc::new(PopulationSnapshot::new(population, 0));
        self.publish(fresh.clone());
        tracing::debug!(cells = fresh.cell_count(), "clock reset");
        fresh
    }

    fn publish(&self, snapshot: Arc<PopulationSnapshot>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }
}
