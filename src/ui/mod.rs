//! User interface rendering
//!
//! - `render` - Main rendering entry point
//! - `components` - Header, stats bar, search bar, column headers, footer
//! - `process_list` - Process list rendering
//! - `plain` - Uncolored output for one-shot mode
//! - `strings` - English and Portuguese text
//! - `utils` - Shared utilities

mod components;
mod plain;
mod process_list;
mod render;
mod strings;
mod utils;

pub use plain::{write_plain, PLAIN_WIDTH};
pub use render::{render, visible_rows};
pub use strings::Language;
