//! Portable backend for non-Windows hosts, built on `sysinfo`
//!
//! One `System` instance is kept for the lifetime of the backend. Every
//! `enumerate` refreshes the whole process table; `usage` then reads from
//! that refreshed table so a pass sees one consistent snapshot.

use std::time::Duration;

use sysinfo::{Pid, ProcessesToUpdate, System};

use super::error::{refuse_protected, EnumerationError, QueryError, TerminateError};
use super::source::{KillOutcome, ProcessEntry, ProcessSource, ProcessTerminator, ProcessUsage};

/// Process source and terminator backed by `sysinfo`.
pub struct SysinfoBackend {
    system: System,
    logical_cores: u32,
}

impl SysinfoBackend {
    pub fn new() -> Self {
        let logical_cores = std::thread::available_parallelism()
            .map(|n| n.get() as u32)
            .unwrap_or(1);
        Self {
            system: System::new(),
            logical_cores,
        }
    }
}

impl Default for SysinfoBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessSource for SysinfoBackend {
    fn enumerate(&mut self) -> Result<Vec<ProcessEntry>, EnumerationError> {
        self.system.refresh_processes(ProcessesToUpdate::All, true);

        let processes: Vec<ProcessEntry> = self
            .system
            .processes()
            .iter()
            // Linux threads show up as tasks; only real processes count
            .filter(|(_, process)| process.thread_kind().is_none())
            .map(|(pid, process)| {
                ProcessEntry::new(pid.as_u32(), process.name().to_string_lossy().into_owned())
            })
            .collect();

        // A live system always contains at least this process
        if processes.is_empty() {
            return Err(EnumerationError::Os("process table is empty".to_string()));
        }
        Ok(processes)
    }

    fn usage(&mut self, pid: u32) -> Result<ProcessUsage, QueryError> {
        let process = self
            .system
            .process(Pid::from_u32(pid))
            .ok_or(QueryError::NotFound { pid })?;

        Ok(ProcessUsage {
            resident_bytes: process.memory(),
            cpu_time: Duration::from_millis(process.accumulated_cpu_time()),
        })
    }

    fn logical_cores(&self) -> u32 {
        self.logical_cores
    }
}

impl ProcessTerminator for SysinfoBackend {
    fn terminate(&mut self, pid: u32) -> Result<KillOutcome, TerminateError> {
        refuse_protected(pid)?;

        let target = Pid::from_u32(pid);
        self.system
            .refresh_processes(ProcessesToUpdate::Some(&[target]), true);

        let Some(process) = self.system.process(target) else {
            return Ok(KillOutcome::AlreadyExited);
        };
        if process.kill() {
            return Ok(KillOutcome::Terminated);
        }

        // The signal was rejected; it may have exited in the meantime
        self.system
            .refresh_processes(ProcessesToUpdate::Some(&[target]), true);
        if self.system.process(target).is_none() {
            Ok(KillOutcome::AlreadyExited)
        } else {
            Err(TerminateError::Os {
                pid,
                message: "kill signal was rejected".to_string(),
            })
        }
    }
}
