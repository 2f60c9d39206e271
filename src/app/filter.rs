//! Filtered and sorted view over the tracked set
//!
//! Pure: the tracked set, the sampler and the OS are never touched.

use std::cmp::Ordering;

use crate::app::reconciler::TrackedProcess;
use crate::app::sort::SortMode;
use crate::constants::SEARCH_PLACEHOLDER_MARKER;

/// Returns true when `search` should not filter anything.
///
/// Blank text and the search-box placeholder both count as "no filter".
pub fn is_inactive(search: &str) -> bool {
    search.trim().is_empty() || search.contains(SEARCH_PLACEHOLDER_MARKER)
}

/// Case-insensitive match on display name or the "PID: n" description
fn matches(process: &TrackedProcess, needle: &str) -> bool {
    process.display_name.to_lowercase().contains(needle)
        || process.description().to_lowercase().contains(needle)
}

fn compare(a: &TrackedProcess, b: &TrackedProcess, mode: SortMode) -> Ordering {
    match mode {
        SortMode::Name => a
            .display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase()),
        SortMode::CpuDescending => b
            .cpu_percent
            .partial_cmp(&a.cpu_percent)
            .unwrap_or(Ordering::Equal),
        SortMode::MemoryDescending => b.memory_mb.cmp(&a.memory_mb),
    }
}

/// Builds the visible list: filter by `search`, then order by `mode`.
///
/// The sort is stable, so ties keep tracked-set insertion order.
pub fn view(tracked: &[TrackedProcess], search: &str, mode: SortMode) -> Vec<TrackedProcess> {
    let mut visible: Vec<TrackedProcess> = if is_inactive(search) {
        tracked.to_vec()
    } else {
        let needle = search.to_lowercase();
        tracked
            .iter()
            .filter(|p| matches(p, &needle))
            .cloned()
            .collect()
    };

    visible.sort_by(|a, b| compare(a, b, mode));
    visible
}
