//! Header, stats bar, search bar, column headers, and footer components

use std::io::{self, Write};

use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, MonitorEvent};
use crate::constants::SEARCH_PLACEHOLDER_MARKER;

use super::process_list::header_text;
use super::utils::{pad_to_width, truncate_string};

/// Renders the title bar with the subtitle right-aligned.
pub fn render_header<W: Write>(out: &mut W, app: &App, width: usize) -> io::Result<()> {
    let strings = app.language.strings();
    let title = format!(" {}", strings.title);
    let subtitle = format!("{} ", strings.subtitle);

    // Drop the subtitle when both do not fit
    let line = if title.width() + subtitle.width() + 2 <= width {
        let spacing = width - title.width() - subtitle.width();
        format!("{}{}{}", title, " ".repeat(spacing), subtitle)
    } else {
        pad_to_width(&title, width)
    };

    execute!(
        out,
        SetBackgroundColor(Color::DarkBlue),
        SetForegroundColor(Color::White),
        Print(line),
        ResetColor,
        Print("\r\n")
    )
}

/// Renders the stats line: application count, sort order, refresh interval.
pub fn render_stats<W: Write>(out: &mut W, app: &App, width: usize) -> io::Result<()> {
    let strings = app.language.strings();
    let count = strings.count(app.visible.len(), app.tracked.len(), app.is_filtered());
    let line = format!(
        " {}  |  {}: {}  |  {}: {} ms",
        count,
        strings.sort_label,
        strings.sort_mode_name(app.sort_mode),
        strings.refresh_label,
        app.refresh_interval.as_millis(),
    );

    execute!(
        out,
        SetForegroundColor(Color::Cyan),
        Print(pad_to_width(&line, width)),
        ResetColor,
        Print("\r\n")
    )
}

/// Renders the search box.
///
/// While typing, shows the input with a cursor. Otherwise shows the
/// current search, or the placeholder when nothing narrows the list.
pub fn render_search_bar<W: Write>(out: &mut W, app: &App, width: usize) -> io::Result<()> {
    let strings = app.language.strings();

    if app.view_mode.is_filter_input() {
        let line = format!(" {} {}: {}█", SEARCH_PLACEHOLDER_MARKER, strings.search_label, app.search);
        execute!(
            out,
            SetBackgroundColor(Color::DarkYellow),
            SetForegroundColor(Color::Black),
            Print(pad_to_width(&line, width)),
            ResetColor,
            Print("\r\n")
        )
    } else if app.is_filtered() {
        let line = format!(" {} {}: \"{}\"", SEARCH_PLACEHOLDER_MARKER, strings.search_label, app.search);
        execute!(
            out,
            SetForegroundColor(Color::Yellow),
            Print(pad_to_width(&line, width)),
            ResetColor,
            Print("\r\n")
        )
    } else {
        execute!(
            out,
            SetForegroundColor(Color::DarkGrey),
            Print(pad_to_width(&format!(" {}", strings.search_placeholder), width)),
            ResetColor,
            Print("\r\n")
        )
    }
}

pub fn render_column_headers<W: Write>(out: &mut W, app: &App, width: usize) -> io::Result<()> {
    execute!(
        out,
        SetBackgroundColor(Color::DarkGrey),
        SetForegroundColor(Color::White),
        Print(pad_to_width(&header_text(app.language.strings(), width), width)),
        ResetColor,
        Print("\r\n")
    )
}

/// Renders the footer with the status line and key hints.
///
/// Shows the termination prompt in confirm mode, the last worker event
/// when there is one, and the selected process otherwise.
pub fn render_footer<W: Write>(out: &mut W, app: &App, width: usize) -> io::Result<()> {
    let strings = app.language.strings();

    if let (true, Some(request)) = (app.view_mode.is_confirm_kill(), &app.pending_kill) {
        let line = format!(" {}: {}", strings.confirm_title, strings.confirm_message(&request.name));
        execute!(
            out,
            SetBackgroundColor(Color::DarkRed),
            SetForegroundColor(Color::White),
            Print(pad_to_width(&line, width)),
            ResetColor,
            Print("\r\n")
        )?;
    } else if let Some(event) = &app.status {
        let color = match event {
            MonitorEvent::Terminated { .. } | MonitorEvent::AlreadyExited { .. } => Color::Green,
            MonitorEvent::EnumerationFailed(_) | MonitorEvent::TerminateFailed { .. } => Color::Yellow,
        };
        execute!(
            out,
            SetForegroundColor(color),
            Print(format!(" {}", truncate_string(&strings.event_message(event), width.saturating_sub(1)))),
            ResetColor,
            Print("\r\n")
        )?;
    } else {
        let selected = app
            .selected()
            .map(|p| format!(" {} {}  ({})", p.icon, p.display_name, p.description()))
            .unwrap_or_default();
        execute!(
            out,
            SetForegroundColor(Color::DarkGrey),
            Print(pad_to_width(&selected, width)),
            ResetColor,
            Print("\r\n")
        )?;
    }

    let (hints, background) = if app.view_mode.is_confirm_kill() {
        (strings.confirm_hints, Color::DarkRed)
    } else if app.view_mode.is_filter_input() {
        (strings.search_hints, Color::DarkBlue)
    } else {
        (strings.hints, Color::DarkBlue)
    };
    execute!(
        out,
        SetBackgroundColor(background),
        SetForegroundColor(Color::White),
        Print(pad_to_width(hints, width)),
        ResetColor,
    )
}
