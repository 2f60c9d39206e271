//! Command-line argument parsing

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::constants::{DEFAULT_REFRESH_MS, MAX_REFRESH_MS, MIN_REFRESH_MS};
use crate::ui::Language;

use super::SortMode;

const CONTROLS: &str = "\
CONTROLS:
    q, Ctrl-C     Quit
    /             Search by name or PID
    s             Cycle sort (Name, CPU, Memory)
    1 / 2 / 3     Sort by Name / CPU / Memory
    r, F5         Refresh now
    k             Terminate selected application (asks first)
    Up/Down, PgUp/PgDn, Home/End   Navigate";

/// Parsed command-line arguments
#[derive(Debug, Parser)]
#[command(
    version,
    about = "Live CPU and memory monitor for well-known desktop applications",
    after_help = CONTROLS
)]
pub struct Args {
    /// Refresh interval in milliseconds
    #[arg(
        short,
        long,
        value_name = "MS",
        default_value_t = DEFAULT_REFRESH_MS,
        value_parser = clap::value_parser!(u64).range(MIN_REFRESH_MS..=MAX_REFRESH_MS)
    )]
    pub refresh: u64,

    /// Initial sort order
    #[arg(short, long, value_enum, default_value_t = SortMode::Name)]
    pub sort: SortMode,

    /// Initial search text (matches application name or "PID: n")
    #[arg(short, long, value_name = "TEXT")]
    pub filter: Option<String>,

    /// Interface language
    #[arg(short, long, value_enum, default_value_t = Language::English)]
    pub lang: Language,

    /// Sample twice one interval apart, print the list and exit
    #[arg(long)]
    pub once: bool,

    /// Write logs to this file (interactive mode logs nowhere otherwise)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh)
    }
}
