//! Changelog preview in the terminal using termimad

use termimad::MadSkin;

use crate::changelog::MARKER;
use crate::display::terminal::should_use_colors;

/// Print changelog markdown, styled when the terminal supports it
pub fn print_changelog(markdown: &str) {
    let visible = strip_marker(markdown);

    if should_use_colors() {
        let mut skin = MadSkin::default();
        customize_skin(&mut skin);
        skin.print_text(&visible);
    } else {
        println!("{}", visible);
    }
}

/// The marker line is a markdown comment; hide it from the preview
fn strip_marker(markdown: &str) -> String {
    markdown
        .lines()
        .filter(|line| line.trim() != MARKER)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Release headings stand out, entries stay plain
fn customize_skin(skin: &mut MadSkin) {
    use termimad::crossterm::style::{Attribute, Color::*};

    skin.headers[0].set_fg(Cyan);
    skin.headers[0].add_attr(Attribute::Bold);
    skin.headers[1].set_fg(Green);
    skin.headers[1].add_attr(Attribute::Bold);
    skin.inline_code.set_fg(Yellow);
    skin.bullet.set_fg(Cyan);
}
