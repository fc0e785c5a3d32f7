//! Changelog workflow
//!
//! - collector: draft a release entry in an editor from the commit log
//! - updater: splice the entry into CHANGELOG.md and recompile the HTML view

mod collector;
mod updater;

pub use collector::Collector;
pub use updater::{update_changelog, ChangelogFile, Splice};

/// Insertion point for the next release section. A markdown link reference
/// definition, so it never shows up in rendered output.
pub const MARKER: &str = "[comment]: # (DO NOT MODIFY. new changelog goes here)";
