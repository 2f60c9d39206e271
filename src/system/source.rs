//! OS collaborator contracts
//!
//! The reconciler never talks to the OS directly. It asks a
//! `ProcessSource` for the process table and per-process usage, and a
//! `ProcessTerminator` to end a process. Each platform backend
//! implements both; tests use in-memory fakes.

use std::time::Duration;

use super::error::{EnumerationError, QueryError, TerminateError};

/// One row of the OS process table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    /// Process ID
    pub pid: u32,
    /// Executable name as reported by the OS (e.g., "chrome.exe")
    pub name: String,
}

impl ProcessEntry {
    pub fn new(pid: u32, name: impl Into<String>) -> Self {
        Self {
            pid,
            name: name.into(),
        }
    }
}

/// Resource usage of a single process at the moment of the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessUsage {
    /// Resident set / working set in bytes
    pub resident_bytes: u64,
    /// Cumulative processor time (kernel + user) since process start
    pub cpu_time: Duration,
}

/// Result of a successful termination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillOutcome {
    /// The process was terminated by us
    Terminated,
    /// The process was already gone; treated like success
    AlreadyExited,
}

/// Supplies the live process table.
pub trait ProcessSource {
    /// Enumerates every live process. Cheap: PID and name only.
    fn enumerate(&mut self) -> Result<Vec<ProcessEntry>, EnumerationError>;

    /// Queries resident size and cumulative CPU time of one process.
    ///
    /// Must tolerate the process having exited since `enumerate`.
    fn usage(&mut self, pid: u32) -> Result<ProcessUsage, QueryError>;

    /// Number of logical processors used to normalise CPU percentages.
    fn logical_cores(&self) -> u32;
}

/// Ends processes on request.
pub trait ProcessTerminator {
    fn terminate(&mut self, pid: u32) -> Result<KillOutcome, TerminateError>;
}
