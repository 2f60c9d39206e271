//! Scriptable in-memory backend for core and scheduler tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};

use crate::constants::BYTES_PER_MB;
use crate::system::{
    EnumerationError, KillOutcome, ProcessEntry, ProcessSource, ProcessTerminator, ProcessUsage,
    QueryError, TerminateError,
};

#[derive(Debug, Default)]
pub struct FakeState {
    pub processes: Vec<ProcessEntry>,
    pub usage: HashMap<u32, ProcessUsage>,
    /// PIDs whose usage query fails
    pub unreadable: Vec<u32>,
    pub enumeration_fails: bool,
    /// PIDs whose termination is rejected
    pub protected: Vec<u32>,
    pub enumerations: usize,
    pub terminated: Vec<u32>,
    /// When set, a terminated process stays listed for one more enumeration
    pub slow_exit: bool,
    /// Terminated PIDs the next enumeration still reports
    pub exiting: Vec<u32>,
    /// When set, every enumeration waits for one message on the gate
    pub gate: Option<Receiver<()>>,
    /// Signalled when an enumeration starts, before the gate
    pub entered: Option<Sender<()>>,
}

/// Cloneable handle; clones share one process table.
#[derive(Debug, Clone, Default)]
pub struct FakeSystem {
    state: Arc<Mutex<FakeState>>,
}

impl FakeSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake state poisoned")
    }

    /// Adds (or replaces) a process with `memory_mb` resident and
    /// `cpu_ms` cumulative CPU time.
    pub fn spawn(&self, pid: u32, name: &str, memory_mb: u64, cpu_ms: u64) {
        let mut state = self.state();
        state.processes.retain(|p| p.pid != pid);
        state.processes.push(ProcessEntry::new(pid, name));
        state.usage.insert(
            pid,
            ProcessUsage {
                resident_bytes: memory_mb * BYTES_PER_MB,
                cpu_time: Duration::from_millis(cpu_ms),
            },
        );
    }

    pub fn exit(&self, pid: u32) {
        let mut state = self.state();
        state.processes.retain(|p| p.pid != pid);
        state.usage.remove(&pid);
    }

    pub fn set_cpu_ms(&self, pid: u32, cpu_ms: u64) {
        if let Some(usage) = self.state().usage.get_mut(&pid) {
            usage.cpu_time = Duration::from_millis(cpu_ms);
        }
    }

    pub fn set_unreadable(&self, pid: u32, unreadable: bool) {
        let mut state = self.state();
        state.unreadable.retain(|p| *p != pid);
        if unreadable {
            state.unreadable.push(pid);
        }
    }

    pub fn set_enumeration_fails(&self, fails: bool) {
        self.state().enumeration_fails = fails;
    }

    pub fn enumerations(&self) -> usize {
        self.state().enumerations
    }
}

impl ProcessSource for FakeSystem {
    fn enumerate(&mut self) -> Result<Vec<ProcessEntry>, EnumerationError> {
        if let Some(entered) = self.state().entered.clone() {
            let _ = entered.send(());
        }
        let gate = self.state().gate.clone();
        if let Some(gate) = gate {
            let _ = gate.recv();
        }

        let mut state = self.state();
        state.enumerations += 1;
        if state.enumeration_fails {
            return Err(EnumerationError::Snapshot("access is denied".to_string()));
        }
        let processes = state.processes.clone();
        for pid in std::mem::take(&mut state.exiting) {
            state.processes.retain(|p| p.pid != pid);
            state.usage.remove(&pid);
        }
        Ok(processes)
    }

    fn usage(&mut self, pid: u32) -> Result<ProcessUsage, QueryError> {
        let state = self.state();
        if state.unreadable.contains(&pid) {
            return Err(QueryError::AccessDenied { pid });
        }
        state
            .usage
            .get(&pid)
            .copied()
            .ok_or(QueryError::NotFound { pid })
    }

    fn logical_cores(&self) -> u32 {
        1
    }
}

impl ProcessTerminator for FakeSystem {
    fn terminate(&mut self, pid: u32) -> Result<KillOutcome, TerminateError> {
        if self.state().protected.contains(&pid) {
            return Err(TerminateError::AccessDenied { pid });
        }
        if !self.state().processes.iter().any(|p| p.pid == pid) {
            return Ok(KillOutcome::AlreadyExited);
        }
        let mut state = self.state();
        if state.slow_exit {
            state.exiting.push(pid);
        } else {
            state.processes.retain(|p| p.pid != pid);
            state.usage.remove(&pid);
        }
        state.terminated.push(pid);
        Ok(KillOutcome::Terminated)
    }
}
