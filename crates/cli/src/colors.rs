// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal color utilities for banners, listings and help output.
//!
//! Respects environment variables:
//! - `NO_COLOR=1`: Disables colors
//! - `COLOR=1`: Forces colors even without TTY

use std::io::IsTerminal;

use mq_core::ConnectionStatus;

use crate::env;

/// ANSI 256-color codes.
pub mod codes {
    /// Section headers: pastel cyan/steel blue
    pub const HEADER: u8 = 74;
    /// Commands/literals: light grey
    pub const LITERAL: u8 = 250;
    /// Secondary details: medium grey
    pub const CONTEXT: u8 = 245;
    /// Online banner
    pub const GOOD: u8 = 114;
    /// Server-offline banner and pending counts
    pub const WARN: u8 = 179;
    /// Network-offline banner and failures
    pub const BAD: u8 = 167;

    pub const RESET: &str = "\x1b[0m";
}

/// Check if colors should be enabled based on TTY and environment variables.
pub fn should_colorize() -> bool {
    if env::no_color() {
        return false;
    }
    if env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Format a 256-color ANSI escape sequence for foreground color.
fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

fn paint(code: u8, text: &str) -> String {
    if !should_colorize() {
        return text.to_string();
    }
    format!("{}{}{}", fg256(code), text, codes::RESET)
}

pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

pub fn literal(text: &str) -> String {
    paint(codes::LITERAL, text)
}

pub fn context(text: &str) -> String {
    paint(codes::CONTEXT, text)
}

pub fn warn(text: &str) -> String {
    paint(codes::WARN, text)
}

pub fn bad(text: &str) -> String {
    paint(codes::BAD, text)
}

/// Color used for a connection status.
pub fn status_code(status: ConnectionStatus) -> u8 {
    match status {
        ConnectionStatus::Online => codes::GOOD,
        ConnectionStatus::ServerOffline => codes::WARN,
        ConnectionStatus::NetworkOffline => codes::BAD,
    }
}

/// The status banner, colored by severity.
pub fn banner(status: ConnectionStatus) -> String {
    paint(status_code(status), status.banner())
}

/// Colorize an examples help block.
///
/// Lines ending in `:` are headers. In other lines the command runs up to
/// the first gap of two or more spaces and the rest is left as is.
pub fn examples(text: &str) -> String {
    if !should_colorize() {
        return text.to_string();
    }

    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let indent = &line[..line.len() - trimmed.len()];
            if trimmed.ends_with(':') && !trimmed.contains("  ") {
                return format!("{indent}{}", header(trimmed));
            }
            match find_description_start(trimmed) {
                Some(end) => format!(
                    "{indent}{}{}",
                    literal(&trimmed[..end]),
                    &trimmed[end..]
                ),
                None => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Find where the description starts (after 2+ spaces following the command).
pub fn find_description_start(line: &str) -> Option<usize> {
    let gap = line.find("  ")?;
    let rest = &line[gap..];
    let spaces = rest.len() - rest.trim_start_matches(' ').len();
    (spaces < rest.len()).then_some(gap)
}

#[cfg(test)]
#[path = "colors_tests.rs"]
mod tests;
