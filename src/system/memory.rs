//! Resident-size conversions
//!
//! Backends report resident size in bytes; the tracked set and the list
//! view work in whole megabytes.

use crate::constants::BYTES_PER_MB;

/// Whole megabytes in `bytes`, rounded down.
pub fn bytes_to_mb(bytes: u64) -> u64 {
    bytes / BYTES_PER_MB
}

/// Formats a megabyte count as shown in the memory column (e.g. "512 MB")
pub fn format_mb(mb: u64) -> String {
    format!("{} MB", mb)
}
