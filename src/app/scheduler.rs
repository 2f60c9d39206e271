//! Refresh scheduler
//!
//! A single background thread owns the backend and the `ProcessTracker`.
//! It runs a reconciliation pass on every timer tick and on demand, and
//! publishes one `MonitorUpdate` per pass. Passes never overlap: requests
//! that queue up while a pass runs are folded into one follow-up pass.

use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{select, tick, unbounded, Receiver, Sender, TryRecvError};
use log::{debug, info, warn};

use crate::app::reconciler::{ProcessTracker, ReconcileReport, TrackedProcess};
use crate::constants::{MAX_REFRESH_MS, MIN_REFRESH_MS};
use crate::system::{EnumerationError, KillOutcome, ProcessSource, ProcessTerminator, TerminateError};

/// Requests accepted by the worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run a pass now
    Refresh,
    /// Terminate a process, then run a pass
    Terminate { pid: u32, name: String },
}

/// Something the front end should surface in its status line
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorEvent {
    /// The pass was skipped; the previous list is still shown
    EnumerationFailed(EnumerationError),
    Terminated { pid: u32, name: String },
    /// Treated like a successful termination
    AlreadyExited { pid: u32, name: String },
    TerminateFailed { name: String, error: TerminateError },
}

/// Result of one pass, applied by the front end in a single step.
///
/// The front end takes `tracked` as its new list and marks the rows in
/// `report.created` as newly started.
#[derive(Debug, Clone)]
pub struct MonitorUpdate {
    /// 1 for the first pass
    pub pass: u64,
    pub report: ReconcileReport,
    /// Full tracked set after the pass, in insertion order
    pub tracked: Vec<TrackedProcess>,
    pub events: Vec<MonitorEvent>,
}

/// Work collected from the command queue before a pass
#[derive(Debug, Default, PartialEq)]
struct Pending {
    terminations: Vec<(u32, String)>,
    disconnected: bool,
}

/// Drains everything already queued. Any number of refresh requests
/// collapse into the single pass that follows.
fn drain_pending(commands: &Receiver<Command>, pending: &mut Pending) {
    loop {
        match commands.try_recv() {
            Ok(Command::Refresh) => {}
            Ok(Command::Terminate { pid, name }) => pending.terminations.push((pid, name)),
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                pending.disconnected = true;
                break;
            }
        }
    }
}

/// State owned by the worker thread
struct Worker<B> {
    backend: B,
    tracker: ProcessTracker,
    updates: Sender<MonitorUpdate>,
    passes: u64,
}

impl<B> Worker<B>
where
    B: ProcessSource + ProcessTerminator,
{
    fn new(backend: B, updates: Sender<MonitorUpdate>) -> Self {
        let tracker = ProcessTracker::new(backend.logical_cores());
        Self {
            backend,
            tracker,
            updates,
            passes: 0,
        }
    }

    fn terminate(&mut self, pid: u32, name: String, forgotten: &mut Vec<TrackedProcess>) -> MonitorEvent {
        match self.backend.terminate(pid) {
            Ok(outcome) => {
                forgotten.extend(self.tracker.forget(pid));
                match outcome {
                    KillOutcome::Terminated => {
                        info!("Terminated {} (PID {})", name, pid);
                        MonitorEvent::Terminated { pid, name }
                    }
                    KillOutcome::AlreadyExited => {
                        debug!("{} (PID {}) had already exited", name, pid);
                        MonitorEvent::AlreadyExited { pid, name }
                    }
                }
            }
            Err(error) => {
                warn!("Failed to terminate {}: {}", name, error);
                MonitorEvent::TerminateFailed { name, error }
            }
        }
    }

    /// Handles queued terminations, runs one pass and publishes the result.
    fn run_pass(&mut self, pending: Pending) {
        let mut events = Vec::new();
        let mut forgotten = Vec::new();
        for (pid, name) in pending.terminations {
            events.push(self.terminate(pid, name, &mut forgotten));
        }

        let mut report = match self.tracker.reconcile(&mut self.backend, Instant::now()) {
            Ok(report) => report,
            Err(error) => {
                warn!("Process enumeration failed: {}", error);
                events.push(MonitorEvent::EnumerationFailed(error));
                ReconcileReport::default()
            }
        };
        if !forgotten.is_empty() {
            forgotten.append(&mut report.removed);
            report.removed = forgotten;
        }

        self.passes += 1;
        if !report.is_steady() {
            debug!(
                "Pass {}: {} created, {} removed, {} tracked",
                self.passes,
                report.created.len(),
                report.removed.len(),
                self.tracker.len()
            );
        }
        let update = MonitorUpdate {
            pass: self.passes,
            report,
            tracked: self.tracker.tracked().to_vec(),
            events,
        };
        // The front end may already be gone
        let _ = self.updates.send(update);
    }

    fn run(mut self, commands: Receiver<Command>, interval: Duration) {
        let ticker = tick(interval);
        self.run_pass(Pending::default());

        loop {
            let received = select! {
                recv(commands) -> msg => msg.map(Some),
                recv(ticker) -> _ => Ok(None),
            };
            let mut pending = Pending::default();
            match received {
                Ok(Some(Command::Terminate { pid, name })) => pending.terminations.push((pid, name)),
                Ok(_) => {}
                // Every sender is gone
                Err(_) => break,
            }
            drain_pending(&commands, &mut pending);
            let disconnected = pending.disconnected;

            self.run_pass(pending);
            // A tick that fired during the pass is covered by it
            while ticker.try_recv().is_ok() {}

            if disconnected {
                break;
            }
        }

        debug!("Refresh worker stopped after {} passes", self.passes);
    }
}

/// Clamps a refresh interval to the supported range.
pub fn clamp_interval(interval: Duration) -> Duration {
    interval.clamp(
        Duration::from_millis(MIN_REFRESH_MS),
        Duration::from_millis(MAX_REFRESH_MS),
    )
}

/// Handle to the refresh worker. Dropping it stops the timer, lets the
/// in-flight pass finish and joins the thread.
pub struct RefreshScheduler {
    commands: Option<Sender<Command>>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshScheduler {
    /// Starts the worker. The first pass runs immediately; later passes
    /// follow every `interval` and on request.
    pub fn start<B>(backend: B, interval: Duration) -> std::io::Result<(Self, Receiver<MonitorUpdate>)>
    where
        B: ProcessSource + ProcessTerminator + Send + 'static,
    {
        let interval = clamp_interval(interval);
        let (command_tx, command_rx) = unbounded::<Command>();
        let (update_tx, update_rx) = unbounded::<MonitorUpdate>();

        let handle = std::thread::Builder::new()
            .name("refresh-worker".to_string())
            .spawn(move || Worker::new(backend, update_tx).run(command_rx, interval))?;

        info!("Refresh worker started ({} ms interval)", interval.as_millis());
        Ok((
            Self {
                commands: Some(command_tx),
                handle: Some(handle),
            },
            update_rx,
        ))
    }

    /// Asks for a pass as soon as the current one (if any) finishes.
    pub fn request_refresh(&self) {
        self.send(Command::Refresh);
    }

    /// Asks the worker to terminate `pid`; the outcome arrives as a
    /// `MonitorEvent` on the next update.
    pub fn terminate(&self, pid: u32, name: impl Into<String>) {
        self.send(Command::Terminate {
            pid,
            name: name.into(),
        });
    }

    fn send(&self, command: Command) {
        if let Some(commands) = &self.commands {
            let _ = commands.send(command);
        }
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        // Closing the queue makes the worker leave its loop.
        self.commands = None;
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::fake_system::FakeSystem;

    const WAIT: Duration = Duration::from_secs(2);
    const SLOW_TICK: Duration = Duration::from_millis(MAX_REFRESH_MS);

    fn next(updates: &Receiver<MonitorUpdate>) -> MonitorUpdate {
        updates.recv_timeout(WAIT).expect("update within timeout")
    }

    fn tracked_pids(update: &MonitorUpdate) -> Vec<u32> {
        update.tracked.iter().map(|p| p.pid).collect()
    }

    #[test]
    fn test_first_pass_runs_immediately() {
        let system = FakeSystem::new();
        system.spawn(10, "chrome.exe", 300, 0);

        let (_scheduler, updates) = RefreshScheduler::start(system.clone(), SLOW_TICK).expect("start");
        let update = next(&updates);
        assert_eq!(update.pass, 1);
        assert_eq!(update.report.created.len(), 1);
        assert_eq!(tracked_pids(&update), vec![10]);
        assert!(update.events.is_empty());
    }

    #[test]
    fn test_manual_refresh_runs_a_pass() {
        let system = FakeSystem::new();
        let (scheduler, updates) = RefreshScheduler::start(system.clone(), SLOW_TICK).expect("start");
        assert!(next(&updates).tracked.is_empty());

        system.spawn(11, "spotify.exe", 150, 0);
        scheduler.request_refresh();
        let update = next(&updates);
        assert_eq!(update.pass, 2);
        assert_eq!(tracked_pids(&update), vec![11]);
    }

    #[test]
    fn test_timer_drives_passes() {
        let system = FakeSystem::new();
        let (_scheduler, updates) =
            RefreshScheduler::start(system.clone(), Duration::from_millis(MIN_REFRESH_MS)).expect("start");
        next(&updates);
        system.spawn(12, "code.exe", 500, 0);

        // No refresh is requested; only the timer can pick it up
        let picked_up = (0..10).any(|_| tracked_pids(&next(&updates)) == vec![12]);
        assert!(picked_up);
    }

    #[test]
    fn test_terminate_removes_without_waiting_for_tick() {
        let system = FakeSystem::new();
        system.spawn(10, "chrome.exe", 300, 0);
        system.spawn(11, "vlc.exe", 90, 0);

        let (scheduler, updates) = RefreshScheduler::start(system.clone(), SLOW_TICK).expect("start");
        next(&updates);

        scheduler.terminate(11, "VLC Media Player");
        let update = next(&updates);
        assert_eq!(tracked_pids(&update), vec![10]);
        assert_eq!(update.report.removed.len(), 1);
        assert_eq!(update.report.removed[0].pid, 11);
        assert_eq!(
            update.events,
            vec![MonitorEvent::Terminated { pid: 11, name: "VLC Media Player".to_string() }]
        );
        assert_eq!(system.state().terminated, vec![11]);
    }

    #[test]
    fn test_killed_process_still_listed_is_not_recreated() {
        let system = FakeSystem::new();
        system.spawn(10, "chrome.exe", 300, 0);
        system.spawn(11, "vlc.exe", 90, 0);
        system.state().slow_exit = true;

        let (scheduler, updates) = RefreshScheduler::start(system.clone(), SLOW_TICK).expect("start");
        next(&updates);

        scheduler.terminate(11, "VLC Media Player");
        let update = next(&updates);
        assert_eq!(tracked_pids(&update), vec![10]);
        assert_eq!(update.report.removed[0].pid, 11);
        assert!(update.report.created.is_empty());

        scheduler.request_refresh();
        let update = next(&updates);
        assert_eq!(tracked_pids(&update), vec![10]);
        assert!(update.report.is_steady());
    }

    #[test]
    fn test_already_exited_counts_as_success() {
        let system = FakeSystem::new();
        system.spawn(10, "chrome.exe", 300, 0);

        let (scheduler, updates) = RefreshScheduler::start(system.clone(), SLOW_TICK).expect("start");
        next(&updates);

        system.exit(10);
        scheduler.terminate(10, "Google Chrome");
        let update = next(&updates);
        assert!(update.tracked.is_empty());
        assert_eq!(update.report.removed.len(), 1);
        assert!(matches!(update.events[0], MonitorEvent::AlreadyExited { pid: 10, .. }));
    }

    #[test]
    fn test_rejected_termination_keeps_process() {
        let system = FakeSystem::new();
        system.spawn(10, "mmc.exe", 40, 0);
        system.state().protected.push(10);

        let (scheduler, updates) = RefreshScheduler::start(system.clone(), SLOW_TICK).expect("start");
        next(&updates);

        scheduler.terminate(10, "Management Console");
        let update = next(&updates);
        assert_eq!(tracked_pids(&update), vec![10]);
        assert!(matches!(
            &update.events[0],
            MonitorEvent::TerminateFailed { error: TerminateError::AccessDenied { pid: 10 }, .. }
        ));
    }

    #[test]
    fn test_enumeration_failure_keeps_previous_list() {
        let system = FakeSystem::new();
        system.spawn(10, "chrome.exe", 300, 0);

        let (scheduler, updates) = RefreshScheduler::start(system.clone(), SLOW_TICK).expect("start");
        next(&updates);

        system.set_enumeration_fails(true);
        scheduler.request_refresh();
        let update = next(&updates);
        assert_eq!(update.report, ReconcileReport::default());
        assert_eq!(tracked_pids(&update), vec![10]);
        assert!(matches!(update.events[0], MonitorEvent::EnumerationFailed(_)));
    }

    #[test]
    fn test_queued_refreshes_collapse_into_one_pass() {
        let system = FakeSystem::new();
        let (gate_tx, gate_rx) = crossbeam_channel::unbounded::<()>();
        system.state().gate = Some(gate_rx);

        // The first pass blocks inside enumerate until the gate opens
        let (scheduler, updates) = RefreshScheduler::start(system.clone(), SLOW_TICK).expect("start");
        for _ in 0..5 {
            scheduler.request_refresh();
        }

        gate_tx.send(()).expect("gate open");
        assert_eq!(next(&updates).pass, 1);
        gate_tx.send(()).expect("gate open");
        assert_eq!(next(&updates).pass, 2);

        assert!(updates.recv_timeout(Duration::from_millis(300)).is_err());
        assert_eq!(system.enumerations(), 2);
    }

    #[test]
    fn test_ticks_during_a_long_pass_are_dropped() {
        let system = FakeSystem::new();
        let (gate_tx, gate_rx) = crossbeam_channel::unbounded::<()>();
        let (entered_tx, entered_rx) = crossbeam_channel::unbounded::<()>();
        system.state().gate = Some(gate_rx);
        system.state().entered = Some(entered_tx);

        let interval = Duration::from_millis(MIN_REFRESH_MS);
        let (scheduler, updates) = RefreshScheduler::start(system.clone(), interval).expect("start");
        entered_rx.recv_timeout(WAIT).expect("first pass started");

        // Several intervals elapse while the first pass is held
        std::thread::sleep(interval * 4 + interval / 2);
        gate_tx.send(()).expect("gate open");
        assert_eq!(next(&updates).pass, 1);

        // The missed ticks do not trigger a pass straight away
        assert!(entered_rx.recv_timeout(Duration::from_millis(50)).is_err());

        entered_rx.recv_timeout(WAIT).expect("next tick starts a pass");
        gate_tx.send(()).expect("gate open");
        assert_eq!(next(&updates).pass, 2);
        assert_eq!(system.enumerations(), 2);

        // Release any pass still waiting so the worker can be joined
        drop(gate_tx);
        drop(scheduler);
    }

    #[test]
    fn test_drain_pending_keeps_terminations() {
        let (tx, rx) = crossbeam_channel::unbounded();
        tx.send(Command::Refresh).expect("send");
        tx.send(Command::Terminate { pid: 7, name: "Zoom".to_string() }).expect("send");
        tx.send(Command::Refresh).expect("send");

        let mut pending = Pending::default();
        drain_pending(&rx, &mut pending);
        assert_eq!(pending.terminations, vec![(7, "Zoom".to_string())]);
        assert!(!pending.disconnected);

        drop(tx);
        drain_pending(&rx, &mut pending);
        assert!(pending.disconnected);
    }

    #[test]
    fn test_drop_joins_worker() {
        let system = FakeSystem::new();
        let (scheduler, updates) = RefreshScheduler::start(system.clone(), SLOW_TICK).expect("start");
        next(&updates);

        drop(scheduler);
        // Worker is gone, so the update channel is closed
        assert!(updates.recv_timeout(WAIT).is_err());
    }

    #[test]
    fn test_interval_is_clamped() {
        assert_eq!(clamp_interval(Duration::from_millis(10)), Duration::from_millis(MIN_REFRESH_MS));
        assert_eq!(clamp_interval(Duration::from_secs(60)), Duration::from_millis(MAX_REFRESH_MS));
        assert_eq!(clamp_interval(Duration::from_secs(2)), Duration::from_secs(2));
    }
}
