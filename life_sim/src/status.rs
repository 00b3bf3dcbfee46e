// status.rs - Periodic generation / population / scale readout

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::MissedTickBehavior;

use crate::clock::SimulationClock;
use crate::viewport::ScaleGauge;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusReport {
    pub generation: u64,
    pub cell_count: usize,
    pub scale: f32,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generation: {}  Live Cells: {}  Scale: {:.3}",
            self.generation, self.cell_count, self.scale
        )
    }
}

pub trait StatusSink: Send + Sync {
    fn update(&self, report: &StatusReport);
}

/// Reads whatever snapshot is published and forwards a report, on its own
/// cadence. It never waits on a step in progress.
pub struct StatusPoller {
    clock: Arc<SimulationClock>,
    gauge: Arc<ScaleGauge>,
    sink: Arc<dyn StatusSink>,
    cadence: Duration,
}

impl StatusPoller {
    pub fn new(clock: Arc<SimulationClock>, gauge: Arc<ScaleGauge>, sink: Arc<dyn StatusSink>, cadence: Duration) -> Self {
        Self { clock, gauge, sink, cadence }
    }

    pub fn read(&self) -> StatusReport {
        let snapshot = self.clock.snapshot();
        StatusReport {
            generation: snapshot.generation(),
            cell_count: snapshot.cell_count(),
            scale: self.gauge.get(),
        }
    }

    /// Polls for the rest of the process lifetime.
    pub fn spawn(self, runtime: &Handle) {
        tracing::debug!(cadence = ?self.cadence, "status poller started");
        runtime.spawn(async move {
            let mut ticker = tokio::time::interval(self.cadence);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                self.sink.update(&self.read());
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::tests::GatedEngine;
    use golife::{Conway, Population};
    use std::sync::Mutex;
    use std::thread;

    #[derive(Default)]
    struct LastReport(Mutex<Vec<StatusReport>>);

    impl StatusSink for LastReport {
        fn update(&self, report: &StatusReport) {
            self.0.lock().unwrap().push(*report);
        }
    }

    fn clock() -> Arc<SimulationClock> {
        Arc::new(SimulationClock::new(Box::new(Conway), Population::from_cells([(0, 1), (1, 1), (2, 1)])))
    }

    #[test]
    fn report_formats_like_the_status_bar() {
        let report = StatusReport { generation: 12, cell_count: 3, scale: 2.5 };
        assert_eq!(report.to_string(), "Generation: 12  Live Cells: 3  Scale: 2.500");
    }

    #[test]
    fn read_reflects_latest_snapshot_and_scale() {
        let clock = clock();
        let gauge = Arc::new(ScaleGauge::default());
        let poller = StatusPoller::new(clock.clone(), gauge.clone(), Arc::new(LastReport::default()), Duration::from_millis(20));

        clock.advance().unwrap();
        gauge.set(7.25);
        assert_eq!(poller.read(), StatusReport { generation: 1, cell_count: 3, scale: 7.25 });
    }

    #[test]
    fn read_does_not_wait_for_an_advance_in_flight() {
        let (engine, entered, release) = GatedEngine::new();
        let clock = Arc::new(SimulationClock::new(Box::new(engine), Population::from_cells([(0, 1), (1, 1), (2, 1)])));
        let poller = StatusPoller::new(clock.clone(), Arc::new(ScaleGauge::default()), Arc::new(LastReport::default()), Duration::from_millis(20));

        let stepping = {
            let clock = clock.clone();
            thread::spawn(move || clock.advance().map(|snap| snap.generation()))
        };
        entered.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(poller.read().generation, 0);
        assert_eq!(poller.read().cell_count, 3);

        release.send(()).unwrap();
        assert_eq!(stepping.join().unwrap(), Ok(1));
        assert_eq!(poller.read().generation, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn spawned_poller_keeps_reporting() {
        let clock = clock();
        let sink = Arc::new(LastReport::default());
        StatusPoller::new(clock.clone(), Arc::new(ScaleGauge::default()), sink.clone(), Duration::from_millis(5))
            .spawn(&Handle::current());

        tokio::time::sleep(Duration::from_millis(40)).await;
        clock.advance().unwrap();
        clock.advance().unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;

        let reports = sink.0.lock().unwrap();
        assert!(reports.len() >= 3);
        assert_eq!(reports[0].generation, 0);
        assert_eq!(reports.last().unwrap().generation, 2);
    }
}
