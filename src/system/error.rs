//! Custom error types for type-safe error handling
//!
//! One enum per OS collaborator so callers can match on exactly the
//! failures that collaborator can produce. None of these are fatal to
//! the monitor: enumeration failures turn a pass into a no-op, query
//! failures skip a single process, and termination failures become a
//! status message.

use thiserror::Error;

// ============================================================================
// Enumeration Error
// ============================================================================

/// The OS-level process list could not be obtained.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnumerationError {
    /// Snapshot of the process table could not be created
    #[error("cannot snapshot the process table: {0}")]
    Snapshot(String),

    /// Any other OS error while walking the process table
    #[error("process enumeration failed: {0}")]
    Os(String),
}

// ============================================================================
// Query Error
// ============================================================================

/// A per-process query (CPU time, resident size) failed.
///
/// Usually the process exited between enumeration and query, or it
/// belongs to another user / a protected session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Process no longer exists
    #[error("process {pid} is no longer running")]
    NotFound { pid: u32 },

    /// Access denied - typically requires elevation
    #[error("access denied to process {pid}")]
    AccessDenied { pid: u32 },

    /// Any other OS error
    #[error("query of process {pid} failed: {message}")]
    Os { pid: u32, message: String },
}

// ============================================================================
// Terminate Error
// ============================================================================

/// A termination request was rejected.
///
/// "Already exited" is not an error; see `KillOutcome::AlreadyExited`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TerminateError {
    /// Refused to touch a system process or the monitor itself
    #[error("refusing to terminate PID {pid} ({reason})")]
    Refused { pid: u32, reason: &'static str },

    /// Access denied - typically requires elevation
    #[error("access denied - try running as Administrator")]
    AccessDenied { pid: u32 },

    /// Any other OS error
    #[error("failed to terminate PID {pid}: {message}")]
    Os { pid: u32, message: String },
}

/// Guard shared by every backend: PID 0 (System Idle), PID 4 (System) and
/// our own process are never terminated.
pub fn refuse_protected(pid: u32) -> Result<(), TerminateError> {
    let reason = match pid {
        0 => "System Idle",
        4 => "System",
        p if p == std::process::id() => "self",
        _ => return Ok(()),
    };
    Err(TerminateError::Refused { pid, reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refuse_protected() {
        assert!(matches!(
            refuse_protected(0),
            Err(TerminateError::Refused { reason: "System Idle", .. })
        ));
        assert!(matches!(
            refuse_protected(4),
            Err(TerminateError::Refused { reason: "System", .. })
        ));
        assert!(refuse_protected(std::process::id()).is_err());
        assert!(refuse_protected(u32::MAX - 1).is_ok());
    }

    #[test]
    fn test_error_messages() {
        let err = QueryError::NotFound { pid: 42 };
        assert_eq!(err.to_string(), "process 42 is no longer running");

        let err = TerminateError::Refused { pid: 4, reason: "System" };
        assert_eq!(err.to_string(), "refusing to terminate PID 4 (System)");
    }
}
