//! Utility functions for UI rendering

use crossterm::style::Color;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::constants::{CPU_THRESHOLD_CRITICAL, CPU_THRESHOLD_MODERATE, CPU_THRESHOLD_WARNING};

/// Truncates a string to fit within `max_width` terminal columns.
///
/// Width is measured per grapheme, so emoji and accented letters are
/// never split. "..." is appended when the text is cut.
#[must_use]
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let target = max_width - 3;
    let mut used = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let width = grapheme.width();
        if used + width > target {
            break;
        }
        result.push_str(grapheme);
        used += width;
    }
    result.push_str("...");
    result
}

/// Truncates and right-pads `s` to exactly `width` terminal columns.
#[must_use]
pub fn pad_to_width(s: &str, width: usize) -> String {
    let mut text = truncate_string(s, width);
    let used = text.width();
    text.push_str(&" ".repeat(width.saturating_sub(used)));
    text
}

/// CPU column text, one decimal place (e.g. "12.5%")
#[must_use]
pub fn format_cpu(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// Returns a color based on CPU usage percentage for visual indication.
///
/// # Color Thresholds
/// * Red - Critical usage (≥80%)
/// * Yellow - Warning level (≥50%)
/// * Cyan - Moderate usage (≥20%)
/// * Green - Low usage (<20%)
#[must_use]
pub fn cpu_color(percent: f64) -> Color {
    if percent >= CPU_THRESHOLD_CRITICAL {
        Color::Red
    } else if percent >= CPU_THRESHOLD_WARNING {
        Color::Yellow
    } else if percent >= CPU_THRESHOLD_MODERATE {
        Color::Cyan
    } else {
        Color::Green
    }
}
