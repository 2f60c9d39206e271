//! Input/keyboard event handling
//!
//! This module handles keyboard input for each application mode:
//! - Normal mode (process list navigation, sorting, refresh, terminate)
//! - Search mode (text input for filtering)
//! - Confirm kill mode (yes/no confirmation)
//!
//! Handlers never talk to the refresh worker; they return a `KeyAction`
//! that the main loop forwards.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::constants::MAX_SEARCH_LEN;

use super::state::{App, KillRequest};
use super::{SortMode, ViewMode};

/// Result of handling a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Continue running the application
    Continue,
    /// Exit the application
    Exit,
    /// Ask the worker for a pass now
    Refresh,
    /// Ask the worker to terminate a process
    Terminate(KillRequest),
}

impl App {
    /// Dispatches a key press to the handler of the current mode.
    ///
    /// `page_rows` is the number of list rows on screen.
    pub fn handle_key(&mut self, key: KeyEvent, page_rows: usize) -> KeyAction {
        // Ctrl-C quits from every mode
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return KeyAction::Exit;
        }

        match self.view_mode {
            ViewMode::ConfirmKill => self.handle_confirm_kill_key(key.code),
            ViewMode::FilterInput => self.handle_filter_key(key.code),
            ViewMode::ProcessList => self.handle_normal_key(key.code, page_rows),
        }
    }

    /// Handles key events in confirm kill mode
    fn handle_confirm_kill_key(&mut self, code: KeyCode) -> KeyAction {
        let yes_keys = self.language.strings().yes_keys;
        match code {
            KeyCode::Char(c) if yes_keys.contains(&c) => match self.confirm_kill() {
                Some(request) => KeyAction::Terminate(request),
                None => KeyAction::Continue,
            },
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.cancel_kill();
                KeyAction::Continue
            }
            _ => KeyAction::Continue,
        }
    }

    /// Handles key events in search mode
    fn handle_filter_key(&mut self, code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Esc => {
                self.search.clear();
                self.view_mode = ViewMode::ProcessList;
                self.rebuild_view();
            }
            KeyCode::Enter => {
                self.view_mode = ViewMode::ProcessList;
            }
            KeyCode::Backspace => {
                self.search.pop();
                self.rebuild_view();
            }
            KeyCode::Char(c) if self.search.chars().count() < MAX_SEARCH_LEN => {
                self.search.push(c);
                self.rebuild_view();
            }
            _ => {}
        }
        KeyAction::Continue
    }

    /// Handles key events in normal mode (process list)
    fn handle_normal_key(&mut self, code: KeyCode, page_rows: usize) -> KeyAction {
        // Any key press dismisses the status message
        self.status = None;

        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return KeyAction::Exit,
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::F(5) => return KeyAction::Refresh,
            KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Delete => self.request_kill(),
            KeyCode::Char('s') | KeyCode::Char('S') => self.cycle_sort(),
            KeyCode::Char(c @ '1'..='3') => {
                if let Some(mode) = SortMode::from_digit(c) {
                    self.set_sort(mode);
                }
            }
            KeyCode::Char('/') => {
                // Leaving a placeholder in the box would block typing
                if !self.is_filtered() {
                    self.search.clear();
                }
                self.view_mode = ViewMode::FilterInput;
            }
            KeyCode::Esc => {
                self.search.clear();
                self.rebuild_view();
            }
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::PageUp => self.page_up(page_rows),
            KeyCode::PageDown => self.page_down(page_rows),
            KeyCode::Home => self.jump_to_start(),
            KeyCode::End => self.jump_to_end(),
            _ => {}
        }
        KeyAction::Continue
    }
}
