//! Navigation methods for the application

use super::state::App;

impl App {
    fn last_index(&self) -> usize {
        self.visible.len().saturating_sub(1)
    }

    /// Moves selection up by one row.
    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Moves selection down by one row.
    pub fn move_down(&mut self) {
        self.selected_index = (self.selected_index + 1).min(self.last_index());
    }

    /// Moves selection up by one page of `visible_rows` rows.
    pub fn page_up(&mut self, visible_rows: usize) {
        self.selected_index = self.selected_index.saturating_sub(visible_rows);
    }

    /// Moves selection down by one page of `visible_rows` rows.
    pub fn page_down(&mut self, visible_rows: usize) {
        self.selected_index = (self.selected_index + visible_rows).min(self.last_index());
    }

    /// Jumps selection to the first process.
    pub fn jump_to_start(&mut self) {
        self.selected_index = 0;
    }

    /// Jumps selection to the last process.
    pub fn jump_to_end(&mut self) {
        self.selected_index = self.last_index();
    }

    /// Scrolls just enough to keep the selected row on screen.
    pub fn scroll_to_selection(&mut self, visible_rows: usize) {
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if visible_rows > 0 && self.selected_index >= self.scroll_offset + visible_rows {
            self.scroll_offset = self.selected_index + 1 - visible_rows;
        }
    }
}
