//! System information module - process table, usage, and termination
//!
//! The core only sees the `ProcessSource` / `ProcessTerminator` traits.
//! `SystemBackend` names the implementation for the current platform:
//! raw Win32 calls on Windows, `sysinfo` everywhere else.

pub mod cpu;
pub mod error;
pub mod memory;
pub mod source;

#[cfg(windows)]
mod processes;
#[cfg(windows)]
mod win32;

#[cfg(not(windows))]
mod portable;

pub use cpu::{CpuSampler, SampleKey};
pub use error::{EnumerationError, QueryError, TerminateError};
pub use memory::{bytes_to_mb, format_mb};
pub use source::{KillOutcome, ProcessEntry, ProcessSource, ProcessTerminator, ProcessUsage};

/// Backend for the platform we were built for
#[cfg(windows)]
pub type SystemBackend = win32::Win32Backend;

/// Backend for the platform we were built for
#[cfg(not(windows))]
pub type SystemBackend = portable::SysinfoBackend;
