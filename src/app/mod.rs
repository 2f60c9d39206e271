//! Application state and logic
//!
//! The core (`registry`, `reconciler`, `filter`, `scheduler`) tracks known
//! applications; `state`, `input` and `navigation` drive the terminal
//! front end.

pub mod cli;
pub mod filter;
mod input;
mod navigation;
pub mod reconciler;
pub mod registry;
pub mod scheduler;
mod sort;
mod state;
mod view_mode;

#[cfg(test)]
mod fake_system;

pub use cli::Args;
pub use input::KeyAction;
pub use reconciler::{ReconcileReport, TrackedProcess};
pub use scheduler::{MonitorEvent, MonitorUpdate, RefreshScheduler};
pub use sort::SortMode;
pub use state::{App, KillRequest};
pub use view_mode::ViewMode;
