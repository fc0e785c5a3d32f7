//! Terminal display module
//!
//! Progress spinner and changelog preview, with automatic TTY detection.

mod formatter;
mod progress;
mod terminal;

pub use formatter::print_changelog;
pub use progress::Spinner;
