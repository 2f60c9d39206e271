//! Application state for the terminal front end
//!
//! The front end owns no tracking state: it keeps the latest tracked set
//! published by the refresh worker and derives the visible list from it.

use std::time::Duration;

use super::cli::Args;
use super::filter;
use super::reconciler::TrackedProcess;
use super::scheduler::{MonitorEvent, MonitorUpdate};
use super::{SortMode, ViewMode};
use crate::ui::Language;

/// A termination the user has asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillRequest {
    pub pid: u32,
    pub name: String,
}

/// Application state
pub struct App {
    /// Tracked set from the latest pass, in insertion order
    pub tracked: Vec<TrackedProcess>,
    /// Filtered and sorted list shown on screen
    pub visible: Vec<TrackedProcess>,
    /// Currently selected row in `visible`
    pub selected_index: usize,
    /// Scroll offset for the process list
    pub scroll_offset: usize,
    pub sort_mode: SortMode,
    /// Search box text
    pub search: String,
    /// Current view/input mode
    pub view_mode: ViewMode,
    /// Process waiting for confirmation
    pub pending_kill: Option<KillRequest>,
    /// Last event worth showing in the status line
    pub status: Option<MonitorEvent>,
    pub language: Language,
    pub refresh_interval: Duration,
    /// Number of passes received so far
    pub passes: u64,
    /// PIDs that appeared in the latest pass, shown highlighted
    pub just_started: Vec<u32>,
}

impl App {
    pub fn new(language: Language, sort_mode: SortMode, refresh_interval: Duration) -> Self {
        Self {
            tracked: Vec::new(),
            visible: Vec::new(),
            selected_index: 0,
            scroll_offset: 0,
            sort_mode,
            search: String::new(),
            view_mode: ViewMode::ProcessList,
            pending_kill: None,
            status: None,
            language,
            refresh_interval,
            passes: 0,
            just_started: Vec::new(),
        }
    }

    /// Creates the state configured by command-line arguments
    pub fn with_args(args: &Args) -> Self {
        let mut app = Self::new(args.lang, args.sort, args.refresh_interval());
        if let Some(filter) = &args.filter {
            app.search = filter.clone();
        }
        app
    }

    /// Applies one pass in a single step.
    pub fn apply_update(&mut self, update: MonitorUpdate) {
        // Everything is new on the first pass; nothing to point out
        self.just_started = if update.pass > 1 {
            update.report.created.iter().map(|p| p.pid).collect()
        } else {
            Vec::new()
        };
        self.tracked = update.tracked;
        self.passes = update.pass;

        match update.events.into_iter().last() {
            Some(event) => self.status = Some(event),
            // A successful pass clears a stale enumeration error
            None => {
                if matches!(self.status, Some(MonitorEvent::EnumerationFailed(_))) {
                    self.status = None;
                }
            }
        }

        // The pending process is gone; nothing left to confirm
        let pending_gone = self
            .pending_kill
            .as_ref()
            .is_some_and(|request| !self.tracked.iter().any(|p| p.pid == request.pid));
        if pending_gone {
            self.cancel_kill();
        }

        self.rebuild_view();
    }

    /// Recomputes the visible list, keeping the selected process selected
    /// when it is still visible.
    pub fn rebuild_view(&mut self) {
        let selected_pid = self.selected().map(|p| p.pid);
        self.visible = filter::view(&self.tracked, &self.search, self.sort_mode);

        if let Some(index) = selected_pid.and_then(|pid| self.visible.iter().position(|p| p.pid == pid)) {
            self.selected_index = index;
        } else if self.selected_index >= self.visible.len() {
            self.selected_index = self.visible.len().saturating_sub(1);
        }
    }

    /// True when the search text narrows the list
    pub fn is_filtered(&self) -> bool {
        !filter::is_inactive(&self.search)
    }

    pub fn is_just_started(&self, pid: u32) -> bool {
        self.just_started.contains(&pid)
    }

    pub fn selected(&self) -> Option<&TrackedProcess> {
        self.visible.get(self.selected_index)
    }

    /// Toggle to next sort mode
    pub fn cycle_sort(&mut self) {
        self.set_sort(self.sort_mode.next());
    }

    pub fn set_sort(&mut self, mode: SortMode) {
        self.sort_mode = mode;
        self.rebuild_view();
    }

    /// Asks for confirmation before terminating the selected process
    pub fn request_kill(&mut self) {
        let Some(process) = self.selected() else {
            return;
        };
        self.pending_kill = Some(KillRequest {
            pid: process.pid,
            name: process.display_name.to_string(),
        });
        self.view_mode = ViewMode::ConfirmKill;
    }

    /// Confirms the pending termination and hands it to the caller
    pub fn confirm_kill(&mut self) -> Option<KillRequest> {
        self.view_mode = ViewMode::ProcessList;
        self.pending_kill.take()
    }

    /// Cancels the pending termination
    pub fn cancel_kill(&mut self) {
        if self.view_mode.is_confirm_kill() {
            self.view_mode = ViewMode::ProcessList;
        }
        self.pending_kill = None;
    }
}
