//! View mode enum for application state
//!
//! Defines mutually exclusive application modes, ensuring only one
//! mode can be active at a time.

/// The current view/input mode of the application.
///
/// The mode determines how keyboard input is handled and what the
/// footer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Normal process list view (default mode)
    #[default]
    ProcessList,

    /// Search input mode - typing into the search box
    FilterInput,

    /// Terminate confirmation - waiting for yes/no
    ConfirmKill,
}

impl ViewMode {
    /// Returns true if in search input mode
    #[inline]
    pub fn is_filter_input(&self) -> bool {
        matches!(self, ViewMode::FilterInput)
    }

    /// Returns true if in terminate confirmation mode
    #[inline]
    pub fn is_confirm_kill(&self) -> bool {
        matches!(self, ViewMode::ConfirmKill)
    }
}
