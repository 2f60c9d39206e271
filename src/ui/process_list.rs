//! Process list rendering

use std::io::{self, Write};

use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use crate::app::{App, TrackedProcess};
use crate::constants::{CPU_COL_WIDTH, DESCRIPTION_COL_WIDTH, ICON_COL_WIDTH, MEMORY_COL_WIDTH};
use crate::system::format_mb;

use super::strings::Strings;
use super::utils::{cpu_color, format_cpu, pad_to_width, truncate_string};

/// Narrowest the application column gets on tiny terminals
const MIN_NAME_WIDTH: usize = 10;

/// Width left for the application name once the fixed columns are placed.
pub fn name_width(width: usize) -> usize {
    let fixed = 1 + ICON_COL_WIDTH + DESCRIPTION_COL_WIDTH + CPU_COL_WIDTH + MEMORY_COL_WIDTH;
    width.saturating_sub(fixed).max(MIN_NAME_WIDTH)
}

/// One list row split where the CPU cell changes color
pub struct RowText {
    pub prefix: String,
    pub cpu: String,
    pub memory: String,
}

impl RowText {
    pub fn new(process: &TrackedProcess, width: usize) -> Self {
        let prefix = format!(
            " {}{}{}",
            pad_to_width(process.icon, ICON_COL_WIDTH),
            pad_to_width(process.display_name, name_width(width)),
            pad_to_width(&process.description(), DESCRIPTION_COL_WIDTH),
        );
        Self {
            prefix,
            cpu: format!("{:>w$}", format_cpu(process.cpu_percent), w = CPU_COL_WIDTH),
            memory: format!("{:>w$}", format_mb(process.memory_mb), w = MEMORY_COL_WIDTH),
        }
    }

    pub fn plain(&self) -> String {
        format!("{}{}{}", self.prefix, self.cpu, self.memory)
    }
}

/// Column header line matching the `RowText` layout
pub fn header_text(strings: &Strings, width: usize) -> String {
    format!(
        " {}{}{:>cpu$}{:>mem$}",
        " ".repeat(ICON_COL_WIDTH),
        pad_to_width(strings.header_application, name_width(width) + DESCRIPTION_COL_WIDTH),
        strings.header_cpu,
        strings.header_memory,
        cpu = CPU_COL_WIDTH,
        mem = MEMORY_COL_WIDTH,
    )
}

/// Renders the scrollable process list.
///
/// Highlights the selected application, colors the CPU cell by load and
/// shows applications that started since the previous pass in green.
/// An empty list shows a hint instead of rows.
pub fn render_process_list<W: Write>(
    out: &mut W,
    app: &mut App,
    visible_rows: usize,
    width: usize,
) -> io::Result<()> {
    app.scroll_to_selection(visible_rows);

    let mut drawn = 0;
    if app.visible.is_empty() && visible_rows > 0 {
        let strings = app.language.strings();
        let message = if app.tracked.is_empty() { strings.empty_list } else { strings.no_match };
        execute!(
            out,
            SetForegroundColor(Color::DarkGrey),
            Print(format!(" {}", truncate_string(message, width.saturating_sub(1)))),
            ResetColor,
            Print("\r\n")
        )?;
        drawn = 1;
    }

    for (i, process) in app
        .visible
        .iter()
        .skip(app.scroll_offset)
        .take(visible_rows)
        .enumerate()
    {
        let is_selected = app.scroll_offset + i == app.selected_index;
        let row = RowText::new(process, width);
        let cpu_col = cpu_color(process.cpu_percent);

        if is_selected {
            execute!(
                out,
                SetBackgroundColor(Color::DarkCyan),
                SetForegroundColor(Color::White),
                Print(&row.prefix),
                SetForegroundColor(cpu_col),
                Print(&row.cpu),
                SetForegroundColor(Color::White),
                Print(&row.memory),
                ResetColor,
            )?;
        } else {
            let name_color = if app.is_just_started(process.pid) { Color::Green } else { Color::Reset };
            execute!(
                out,
                SetForegroundColor(name_color),
                Print(&row.prefix),
                SetForegroundColor(cpu_col),
                Print(&row.cpu),
                ResetColor,
                Print(&row.memory),
            )?;
        }
        execute!(out, Print("\r\n"))?;
        drawn += 1;
    }

    // Fill remaining space
    for _ in drawn..visible_rows {
        execute!(out, Print("\r\n"))?;
    }

    Ok(())
}
