//! Uncolored one-shot output for `--once`

use std::io::{self, Write};

use crate::app::App;

use super::process_list::{header_text, RowText};

/// Width used when stdout is not a terminal
pub const PLAIN_WIDTH: usize = 80;

/// Writes the current view as plain text lines.
pub fn write_plain<W: Write>(out: &mut W, app: &App, width: usize) -> io::Result<()> {
    let strings = app.language.strings();
    writeln!(out, "{}", strings.count(app.visible.len(), app.tracked.len(), app.is_filtered()))?;
    writeln!(out, "{}", header_text(strings, width).trim_end())?;

    if app.visible.is_empty() {
        let message = if app.tracked.is_empty() { strings.empty_list } else { strings.no_match };
        writeln!(out, " {}", message)?;
    }
    for process in &app.visible {
        writeln!(out, "{}", RowText::new(process, width).plain())?;
    }
    if let Some(event) = &app.status {
        writeln!(out, "{}", strings.event_message(event))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{MonitorUpdate, ReconcileReport, SortMode, TrackedProcess};
    use crate::ui::Language;
    use std::time::Duration;

    fn process(pid: u32, display_name: &'static str, memory_mb: u64) -> TrackedProcess {
        TrackedProcess {
            pid,
            executable: display_name.to_lowercase(),
            display_name,
            icon: "📦",
            cpu_percent: 0.0,
            memory_mb,
        }
    }

    #[test]
    fn test_plain_output_follows_view_order() {
        let mut app = App::new(Language::English, SortMode::MemoryDescending, Duration::from_secs(2));
        app.apply_update(MonitorUpdate {
            pass: 2,
            report: ReconcileReport::default(),
            tracked: vec![process(1, "Atom", 10), process(2, "Zoom", 900)],
            events: vec![],
        });

        let mut out = Vec::new();
        write_plain(&mut out, &app, PLAIN_WIDTH).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Applications: 2");
        assert!(lines[1].contains("APPLICATION"));
        assert!(lines[2].contains("Zoom") && lines[2].contains("900 MB"));
        assert!(lines[3].contains("Atom") && lines[3].contains("PID: 1"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_plain_output_when_nothing_runs() {
        let app = App::new(Language::Portuguese, SortMode::Name, Duration::from_secs(2));
        let mut out = Vec::new();
        write_plain(&mut out, &app, PLAIN_WIDTH).expect("write");
        assert!(String::from_utf8(out).expect("utf8").contains("Nenhuma aplicação conhecida"));
    }
}
