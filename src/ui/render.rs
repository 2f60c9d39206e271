//! Terminal rendering logic

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{self, Clear, ClearType},
};

use crate::app::App;
use crate::constants::{FOOTER_LINES, HEADER_LINES};

use super::components::{
    render_column_headers, render_footer, render_header, render_search_bar, render_stats,
};
use super::process_list::render_process_list;

/// Rows left for the process list on a terminal `height` lines tall
pub fn list_rows(height: usize) -> usize {
    height.saturating_sub(HEADER_LINES + FOOTER_LINES)
}

/// Rows the process list gets on the current terminal
pub fn visible_rows() -> io::Result<usize> {
    let (_, height) = terminal::size()?;
    Ok(list_rows(height as usize))
}

/// Renders the UI to the terminal
pub fn render(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let (width, height) = terminal::size()?;
    let width = width as usize;
    let height = height as usize;

    execute!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;

    // === HEADER ===
    render_header(stdout, app, width)?;
    render_stats(stdout, app, width)?;
    render_search_bar(stdout, app, width)?;
    render_column_headers(stdout, app, width)?;

    // === PROCESS LIST ===
    render_process_list(stdout, app, list_rows(height), width)?;

    // === FOOTER ===
    render_footer(stdout, app, width)?;

    stdout.flush()
}
