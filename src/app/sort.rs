//! Sorting options for the process list

use clap::ValueEnum;

/// Sort order of the visible list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortMode {
    /// Display name, A to Z
    #[default]
    #[value(name = "name")]
    Name,
    /// Highest CPU first
    #[value(name = "cpu")]
    CpuDescending,
    /// Largest resident size first
    #[value(name = "memory")]
    MemoryDescending,
}

impl SortMode {
    /// Cycle to the next sort option
    pub fn next(self) -> Self {
        match self {
            SortMode::Name => SortMode::CpuDescending,
            SortMode::CpuDescending => SortMode::MemoryDescending,
            SortMode::MemoryDescending => SortMode::Name,
        }
    }

    /// Sort bound to a number key ('1', '2', '3')
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(SortMode::Name),
            '2' => Some(SortMode::CpuDescending),
            '3' => Some(SortMode::MemoryDescending),
            _ => None,
        }
    }
}
