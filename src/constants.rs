//! Centralized constants for the application
//!
//! This module contains the magic numbers and configuration constants
//! used throughout the application, making them easy to find and modify.

// ============================================================================
// Application Info
// ============================================================================

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Application version from Cargo.toml
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Refresh Rate (milliseconds)
// ============================================================================

/// Default refresh interval in milliseconds
pub const DEFAULT_REFRESH_MS: u64 = 2000;

/// Minimum allowed refresh interval
pub const MIN_REFRESH_MS: u64 = 250;

/// Maximum allowed refresh interval
pub const MAX_REFRESH_MS: u64 = 10000;

/// How long a termination waits for the process to exit
#[cfg(windows)]
pub const TERMINATE_WAIT_MS: u32 = 500;

// ============================================================================
// Search
// ============================================================================

/// Marker carried by the search placeholder text; text containing it
/// never filters
pub const SEARCH_PLACEHOLDER_MARKER: &str = "🔍";

/// Longest search text accepted from the keyboard
pub const MAX_SEARCH_LEN: usize = 64;

// ============================================================================
// Byte Size Conversions
// ============================================================================

/// Bytes in a megabyte
pub const BYTES_PER_MB: u64 = 1_048_576;

// ============================================================================
// Layout
// ============================================================================

/// Lines above the process list (header, stats, search bar, column headers)
pub const HEADER_LINES: usize = 4;

/// Lines below the process list (status line, key hints)
pub const FOOTER_LINES: usize = 2;

/// Terminal columns taken by the icon column (emoji are double width)
pub const ICON_COL_WIDTH: usize = 4;

/// Width of the description ("PID: n") column
pub const DESCRIPTION_COL_WIDTH: usize = 12;

/// Width of the CPU column
pub const CPU_COL_WIDTH: usize = 8;

/// Width of the memory column
pub const MEMORY_COL_WIDTH: usize = 10;

// ============================================================================
// CPU Usage Thresholds (for coloring)
// ============================================================================

/// CPU usage threshold for red color (critical)
pub const CPU_THRESHOLD_CRITICAL: f64 = 80.0;

/// CPU usage threshold for yellow color (warning)
pub const CPU_THRESHOLD_WARNING: f64 = 50.0;

/// CPU usage threshold for cyan color (moderate)
pub const CPU_THRESHOLD_MODERATE: f64 = 20.0;
