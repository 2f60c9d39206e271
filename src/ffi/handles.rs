//! RAII ownership of Win32 HANDLEs
//!
//! Every handle the backend opens (process handles and ToolHelp
//! snapshots alike) is wrapped in `OwnedHandle`, which calls
//! CloseHandle exactly once when it goes out of scope, including on
//! early returns and `?` paths.

use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, TH32CS_SNAPPROCESS,
};
use windows::Win32::System::Threading::{OpenProcess, PROCESS_ACCESS_RIGHTS};

/// An open Win32 handle that is closed on drop.
pub struct OwnedHandle(HANDLE);

impl OwnedHandle {
    /// Opens a process by PID with the requested access rights.
    ///
    /// Fails when the process has exited or access is denied.
    pub fn open_process(pid: u32, access: PROCESS_ACCESS_RIGHTS) -> windows::core::Result<Self> {
        // SAFETY: OpenProcess has no preconditions beyond valid flags.
        let handle = unsafe { OpenProcess(access, false, pid)? };
        Ok(Self(handle))
    }

    /// Takes a ToolHelp32 snapshot of every process in the system.
    pub fn process_snapshot() -> windows::core::Result<Self> {
        // SAFETY: the PID argument is ignored for TH32CS_SNAPPROCESS.
        let handle = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0)? };
        Ok(Self(handle))
    }

    /// Borrow the raw HANDLE for a Win32 call. Valid while `self` lives.
    pub fn raw(&self) -> HANDLE {
        self.0
    }
}

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        // SAFETY: we own the handle and close it exactly once.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}
