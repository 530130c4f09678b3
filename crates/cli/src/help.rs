// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help text generation with colorization support.

use crate::colors;
use clap::builder::styling::Styles;

/// Generate clap Styles for help output.
pub fn styles() -> Styles {
    if !colors::should_colorize() {
        return Styles::plain();
    }

    use anstyle::{Ansi256Color, Color, Style};

    let fg = |code: u8| Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))));
    let header = fg(colors::codes::HEADER);
    let context = fg(colors::codes::CONTEXT);

    Styles::styled()
        .header(header)
        .usage(header)
        .literal(fg(colors::codes::LITERAL))
        .placeholder(context)
        .valid(context)
}

/// Main help template with colorized Options header.
pub fn template() -> String {
    format!(
        "{{about-with-newline}}
{{usage-heading}} {{usage}}

{{before-help}}{}
{{options}}{{after-help}}",
        colors::header("Options:")
    )
}

/// Commands list shown before options in main help.
pub fn commands() -> String {
    format!(
        "\
{header_catalog}
  {list}    List movies (server view when online, local changes otherwise)
  {add}     Add a movie
  {edit}    Change fields of a movie
  {delete}  Delete a movie

{header_sync}
  {status}  Probe the backend and show the connection banner
  {queue}   Show operations waiting to be replayed
  {sync}    Replay queued operations now
  {watch}   Keep syncing until interrupted
",
        header_catalog = colors::header("Catalog:"),
        header_sync = colors::header("Sync:"),
        list = colors::literal("list"),
        add = colors::literal("add"),
        edit = colors::literal("edit"),
        delete = colors::literal("delete"),
        status = colors::literal("status"),
        queue = colors::literal("queue"),
        sync = colors::literal("sync"),
        watch = colors::literal("watch"),
    )
}

/// Quickstart help shown after options in main help.
pub fn quickstart() -> String {
    colors::examples(
        "\
Get started:
  marquee status                       Check the backend
  marquee add --title \"Heat\"           Add a movie (queued when offline)
  marquee list --sort rating-desc      Best rated first
  marquee watch                        Sync in the background",
    )
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
