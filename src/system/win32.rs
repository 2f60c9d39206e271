//! Windows backend: Win32 process queries and termination
//!
//! CPU time comes from GetProcessTimes (kernel + user), resident size from
//! GetProcessMemoryInfo (working set), the core count from GetSystemInfo.
//! Every process handle is opened with the narrowest access right that
//! the call needs.

use std::mem;
use std::time::Duration;

use log::debug;
use windows::Win32::Foundation::{ERROR_ACCESS_DENIED, ERROR_INVALID_PARAMETER, FILETIME, WAIT_OBJECT_0};
use windows::Win32::System::ProcessStatus::{GetProcessMemoryInfo, PROCESS_MEMORY_COUNTERS};
use windows::Win32::System::SystemInformation::{GetSystemInfo, SYSTEM_INFO};
use windows::Win32::System::Threading::{
    GetProcessTimes, TerminateProcess, WaitForSingleObject, PROCESS_QUERY_LIMITED_INFORMATION,
    PROCESS_SYNCHRONIZE, PROCESS_TERMINATE,
};

use crate::constants::TERMINATE_WAIT_MS;
use crate::ffi::OwnedHandle;

use super::error::{refuse_protected, EnumerationError, QueryError, TerminateError};
use super::processes::enumerate_processes;
use super::source::{KillOutcome, ProcessEntry, ProcessSource, ProcessTerminator, ProcessUsage};

/// Process source and terminator backed by raw Win32 calls.
#[derive(Debug)]
pub struct Win32Backend {
    logical_cores: u32,
}

impl Win32Backend {
    pub fn new() -> Self {
        Self {
            logical_cores: system_core_count(),
        }
    }
}

impl Default for Win32Backend {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessSource for Win32Backend {
    fn enumerate(&mut self) -> Result<Vec<ProcessEntry>, EnumerationError> {
        enumerate_processes()
    }

    fn usage(&mut self, pid: u32) -> Result<ProcessUsage, QueryError> {
        let handle = OwnedHandle::open_process(pid, PROCESS_QUERY_LIMITED_INFORMATION)
            .map_err(|e| query_error(pid, &e))?;

        Ok(ProcessUsage {
            resident_bytes: working_set(&handle).map_err(|e| query_error(pid, &e))?,
            cpu_time: processor_time(&handle).map_err(|e| query_error(pid, &e))?,
        })
    }

    fn logical_cores(&self) -> u32 {
        self.logical_cores
    }
}

impl ProcessTerminator for Win32Backend {
    fn terminate(&mut self, pid: u32) -> Result<KillOutcome, TerminateError> {
        refuse_protected(pid)?;

        let handle = match OwnedHandle::open_process(pid, PROCESS_TERMINATE | PROCESS_SYNCHRONIZE) {
            Ok(h) => h,
            // OpenProcess reports a vanished PID as an invalid parameter
            Err(e) if e.code() == ERROR_INVALID_PARAMETER.to_hresult() => {
                return Ok(KillOutcome::AlreadyExited)
            }
            Err(e) => return Err(terminate_error(pid, &e)),
        };

        // SAFETY: handle opened with PROCESS_TERMINATE and still owned.
        if let Err(e) = unsafe { TerminateProcess(handle.raw(), 1) } {
            return Err(terminate_error(pid, &e));
        }

        // TerminateProcess only starts the shutdown; the snapshot keeps
        // listing the process until it has exited.
        // SAFETY: handle opened with PROCESS_SYNCHRONIZE and still owned.
        let wait = unsafe { WaitForSingleObject(handle.raw(), TERMINATE_WAIT_MS) };
        if wait != WAIT_OBJECT_0 {
            debug!("PID {} still exiting after {} ms", pid, TERMINATE_WAIT_MS);
        }
        Ok(KillOutcome::Terminated)
    }
}

/// Converts a FILETIME (100-nanosecond intervals) to a Duration
fn filetime_to_duration(ft: &FILETIME) -> Duration {
    let ticks = ((ft.dwHighDateTime as u64) << 32) | (ft.dwLowDateTime as u64);
    Duration::from_nanos(ticks.saturating_mul(100))
}

/// Cumulative kernel + user time of the process.
fn processor_time(handle: &OwnedHandle) -> windows::core::Result<Duration> {
    let mut creation_time = FILETIME::default();
    let mut exit_time = FILETIME::default();
    let mut kernel_time = FILETIME::default();
    let mut user_time = FILETIME::default();

    // SAFETY: valid handle and pointers to live FILETIMEs.
    unsafe {
        GetProcessTimes(
            handle.raw(),
            &mut creation_time,
            &mut exit_time,
            &mut kernel_time,
            &mut user_time,
        )?;
    }

    Ok(filetime_to_duration(&kernel_time) + filetime_to_duration(&user_time))
}

/// Working set size in bytes.
fn working_set(handle: &OwnedHandle) -> windows::core::Result<u64> {
    // cb must be set before the call
    let mut counters = PROCESS_MEMORY_COUNTERS {
        cb: mem::size_of::<PROCESS_MEMORY_COUNTERS>() as u32,
        ..Default::default()
    };

    // SAFETY: valid handle and an initialised counters struct.
    unsafe {
        GetProcessMemoryInfo(
            handle.raw(),
            &mut counters,
            mem::size_of::<PROCESS_MEMORY_COUNTERS>() as u32,
        )?;
    }

    Ok(counters.WorkingSetSize as u64)
}

/// Number of logical processors reported by GetSystemInfo.
fn system_core_count() -> u32 {
    // SAFETY: GetSystemInfo fills the struct and cannot fail.
    let count = unsafe {
        let mut sys_info: SYSTEM_INFO = mem::zeroed();
        GetSystemInfo(&mut sys_info);
        sys_info.dwNumberOfProcessors
    };
    count.max(1)
}

fn query_error(pid: u32, err: &windows::core::Error) -> QueryError {
    let code = err.code();
    if code == ERROR_ACCESS_DENIED.to_hresult() {
        QueryError::AccessDenied { pid }
    } else if code == ERROR_INVALID_PARAMETER.to_hresult() {
        QueryError::NotFound { pid }
    } else {
        QueryError::Os {
            pid,
            message: err.to_string(),
        }
    }
}

fn terminate_error(pid: u32, err: &windows::core::Error) -> TerminateError {
    if err.code() == ERROR_ACCESS_DENIED.to_hresult() {
        TerminateError::AccessDenied { pid }
    } else {
        TerminateError::Os {
            pid,
            message: err.to_string(),
        }
    }
}
