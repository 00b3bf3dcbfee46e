// driver.rs - Background stepping loop with start/stop/step control

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::clock::SimulationClock;
use crate::config::clamp_step_interval;
use crate::error::{AdvanceError, DriverError};
use crate::snapshot::PopulationSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
    /// `step_once` is computing a generation. Only another thread sharing
    /// the driver can observe this; the stepping caller sees `Stopped` again
    /// once `step_once` returns.
    StepRequested,
}

/// Receives driver events. Called from the stepping thread, so
/// implementations must not block for long.
pub trait StepObserver: Send + Sync {
    /// A new generation was published.
    fn stepped(&self, snapshot: &Arc<PopulationSnapshot>);
    /// An advance of the current run failed; the driver has already
    /// stopped. Failures of a run that was already stopped are only logged.
    fn failed(&self, error: &AdvanceError);
    fn run_state_changed(&self, running: bool);
}

struct ActiveRun {
    id: u64,
    stop: watch::Sender<bool>,
}

struct Shared {
    clock: Arc<SimulationClock>,
    observer: Arc<dyn StepObserver>,
    interval_nanos: AtomicU64,
    run: Mutex<Option<ActiveRun>>,
    stepping: AtomicBool,
    next_run_id: AtomicU64,
    live_loops: AtomicUsize,
}

impl Shared {
    fn run(&self) -> MutexGuard<'_, Option<ActiveRun>> {
        self.run.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn step_interval(&self) -> Duration {
        Duration::from_nanos(self.interval_nanos.load(Ordering::Relaxed))
    }

    /// Ends run `id` after a failed advance, unless it was already stopped.
    fn fail_run(&self, id: u64, error: &AdvanceError) {
        let ours = {
            let mut run = self.run();
            let ours = run.as_ref().is_some_and(|active| active.id == id);
            if ours {
                *run = None;
            }
            ours
        };
        if ours {
            tracing::error!(run = id, error = %error, "advance failed, simulation stopped");
            self.observer.failed(error);
            self.observer.run_state_changed(false);
        } else {
            tracing::warn!(run = id, error = %error, "advance failed after its run was stopped");
        }
    }
}

/// Runs the simulation on a tokio runtime while started.
///
/// Each `start` spawns a loop owning a fresh stop channel; `stop` flips it,
/// which also cuts short the loop's sleep. A loop that is mid-advance when
/// stopped finishes that one advance and then exits.
pub struct StepDriver {
    shared: Arc<Shared>,
    runtime: Handle,
}

impl StepDriver {
    pub fn new(clock: Arc<SimulationClock>, observer: Arc<dyn StepObserver>, runtime: Handle, interval: Duration) -> Self {
        let interval = clamp_step_interval(interval);
        Self {
            shared: Arc::new(Shared {
                clock,
                observer,
                interval_nanos: AtomicU64::new(interval.as_nanos() as u64),
                run: Mutex::new(None),
                stepping: AtomicBool::new(false),
                next_run_id: AtomicU64::new(1),
                live_loops: AtomicUsize::new(0),
            }),
            runtime,
        }
    }

    pub fn clock(&self) -> &Arc<SimulationClock> {
        &self.shared.clock
    }

    pub fn run_state(&self) -> RunState {
        if self.shared.run().is_some() {
            RunState::Running
        } else if self.shared.stepping.load(Ordering::Acquire) {
            RunState::StepRequested
        } else {
            RunState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.shared.run().is_some()
    }

    /// Background loops still alive, including ones that were stopped but are
    /// finishing an in-flight advance.
    pub fn background_loops(&self) -> usize {
        self.shared.live_loops.load(Ordering::Acquire)
    }

    pub fn step_interval(&self) -> Duration {
        self.shared.step_interval()
    }

    /// Sets the wait between generations, clamped to 1.5 ms..=500 ms.
    /// A running loop picks it up on its next wait.
    pub fn set_step_interval(&self, interval: Duration) {
        let interval = clamp_step_interval(interval);
        self.shared.interval_nanos.store(interval.as_nanos() as u64, Ordering::Relaxed);
    }

    pub fn start(&self) {
        {
            let mut run = self.shared.run();
            if run.is_some() {
                return;
            }
            let id = self.shared.next_run_id.fetch_add(1, Ordering::Relaxed);
            let (stop, stop_rx) = watch::channel(false);
            *run = Some(ActiveRun { id, stop });
            self.shared.live_loops.fetch_add(1, Ordering::AcqRel);
            self.runtime.spawn(run_loop(self.shared.clone(), id, stop_rx));
            tracing::info!(run = id, interval = ?self.step_interval(), "simulation started");
        }
        self.shared.observer.run_state_changed(true);
    }

    /// Stops the running loop. Does nothing when already stopped.
    pub fn stop(&self) {
        let Some(active) = self.shared.run().take() else {
            return;
        };
        active.stop.send_replace(true);
        tracing::info!(run = active.id, "simulation stopped");
        self.shared.observer.run_state_changed(false);
    }

    /// Advances exactly one generation on the calling thread. Only valid while stopped.
    pub fn step_once(&self) -> Result<Arc<PopulationSnapshot>, DriverError> {
        if self.is_running() {
            return Err(DriverError::Running);
        }

        self.shared.stepping.store(true, Ordering::Release);
        let result = self.shared.clock.advance();
        self.shared.stepping.store(false, Ordering::Release);

        match result {
            Ok(snapshot) => {
                tracing::debug!(generation = snapshot.generation(), "single step");
                self.shared.observer.stepped(&snapshot);
                Ok(snapshot)
            }
            Err(err) => {
                tracing::error!(error = %err, "single step failed");
                self.shared.observer.failed(&err);
                Err(err.into())
            }
        }
    }
}

impl Drop for StepDriver {
    fn drop(&mut self) {
        if let Some(active) = self.shared.run().take() {
            active.stop.send_replace(true);
        }
    }
}

async fn run_loop(shared: Arc<Shared>, id: u64, mut stop: watch::Receiver<bool>) {
    loop {
        if *stop.borrow_and_update() {
            break;
        }

        let clock = shared.clock.clone();
        let result = tokio::task::spawn_blocking(move || clock.advance())
            .await
            .unwrap_or_else(|join_err| Err(AdvanceError::Aborted(join_err.to_string())));

        match result {
            Ok(snapshot) => shared.observer.stepped(&snapshot),
            Err(err) => {
                shared.fail_run(id, &err);
                break;
            }
        }

        if *stop.borrow_and_update() {
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(shared.step_interval()) => {}
            changed = stop.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    shared.live_loops.fetch_sub(1, Ordering::AcqRel);
    tracing::debug!(run = id, "step loop exited");
}
