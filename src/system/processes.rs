//! Process enumeration using the ToolHelp32 API
//!
//! Walks a CreateToolhelp32Snapshot with Process32FirstW/NextW and
//! returns PID and executable name for every live process.

use std::mem;

use windows::Win32::System::Diagnostics::ToolHelp::{
    Process32FirstW, Process32NextW, PROCESSENTRY32W,
};

use crate::ffi::OwnedHandle;

use super::error::EnumerationError;
use super::source::ProcessEntry;

/// Converts a null-terminated wide string (u16 slice) to a Rust String
fn wide_to_string(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..len])
}

/// Enumerates all running processes on the system.
///
/// Entries with an empty executable name (the idle pseudo-process) are
/// skipped.
pub fn enumerate_processes() -> Result<Vec<ProcessEntry>, EnumerationError> {
    let snapshot = OwnedHandle::process_snapshot()
        .map_err(|e| EnumerationError::Snapshot(e.to_string()))?;
    let mut processes = Vec::new();

    // dwSize must be set before the first call
    let mut entry = PROCESSENTRY32W {
        dwSize: mem::size_of::<PROCESSENTRY32W>() as u32,
        ..Default::default()
    };

    // SAFETY: valid snapshot handle and an initialised entry.
    let mut next = unsafe { Process32FirstW(snapshot.raw(), &mut entry) };
    if let Err(e) = &next {
        return Err(EnumerationError::Os(e.to_string()));
    }

    while next.is_ok() {
        let name = wide_to_string(&entry.szExeFile);
        if !name.is_empty() {
            processes.push(ProcessEntry::new(entry.th32ProcessID, name));
        }
        // SAFETY: same as above.
        next = unsafe { Process32NextW(snapshot.raw(), &mut entry) };
    }

    Ok(processes)
}
