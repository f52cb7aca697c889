// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use std::io::IsTerminal;

pub mod codes {
    /// Headers and record ids: steel blue
    pub const HEADER: u8 = 74;
    /// Flags and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Field labels: medium grey
    pub const CONTEXT: u8 = 245;
    /// Absent values and ages: darker grey
    pub const MUTED: u8 = 240;
}

/// Whether to emit ANSI colors on stdout.
pub fn should_colorize() -> bool {
    let set = |name: &str| std::env::var(name).is_ok_and(|v| v == "1");
    decide(set("NO_COLOR"), set("COLOR"), std::io::stdout().is_terminal())
}

/// `NO_COLOR=1` beats `COLOR=1`, which beats terminal detection.
fn decide(no_color: bool, force: bool, tty: bool) -> bool {
    !no_color && (force || tty)
}

/// clap help styles using the same palette.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    let fg = |code| Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))));
    Styles::styled()
        .header(fg(codes::HEADER))
        .literal(fg(codes::LITERAL))
        .placeholder(fg(codes::CONTEXT))
}

fn paint(code: u8, text: &str) -> String {
    if should_colorize() {
        format!("\x1b[38;5;{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

pub fn context(text: &str) -> String {
    paint(codes::CONTEXT, text)
}

pub fn muted(text: &str) -> String {
    paint(codes::MUTED, text)
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
