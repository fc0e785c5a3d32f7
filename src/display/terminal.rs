//! TTY detection and color support logic

use std::io::IsTerminal;

/// Determine if colors should be used based on environment and TTY status
pub fn should_use_colors() -> bool {
    colors_enabled(|key| std::env::var(key).ok(), std::io::stdout().is_terminal())
}

/// Color decision from an environment lookup and the TTY status.
///
/// `NO_COLOR` wins, then `CLICOLOR_FORCE` (any value but `0`), then
/// `CLICOLOR=0`, then the TTY check. See https://no-color.org/.
fn colors_enabled<F>(env: F, is_tty: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if env("NO_COLOR").is_some() {
        return false;
    }

    if env("CLICOLOR_FORCE").is_some_and(|val| val != "0") {
        return true;
    }

    if env("CLICOLOR").is_some_and(|val| val == "0") {
        return false;
    }

    is_tty
}
