// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use std::path::PathBuf;

use crate::colors;
use crate::help;
use clap::{Parser, Subcommand, ValueEnum};
use mq_core::query::DEFAULT_LIMIT;
use mq_core::{MovieId, SortOrder};

pub use args::{non_empty_string, MovieFields};

/// Largest page the backend serves.
const MAX_LIMIT: u32 = 100;

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Listing order, as accepted by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    TitleAsc,
    TitleDesc,
    RatingAsc,
    RatingDesc,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::TitleAsc => SortOrder::TitleAsc,
            SortArg::TitleDesc => SortOrder::TitleDesc,
            SortArg::RatingAsc => SortOrder::RatingAsc,
            SortArg::RatingDesc => SortOrder::RatingDesc,
        }
    }
}

#[derive(Parser)]
#[command(name = "marquee")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "An offline-first movie catalog client")]
#[command(
    long_about = "An offline-first movie catalog client.\n\n\
    Changes made while the backend is unreachable are queued locally and \
    replayed in order once it is back."
)]
#[command(help_template = help::template())]
#[command(before_help = help::commands())]
#[command(after_help = help::quickstart())]
#[command(styles = help::styles())]
pub struct Cli {
    /// Config file [default: <config dir>/marquee/config.toml]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the queue, cache and lock
    #[arg(long, global = true, value_name = "PATH")]
    pub state_dir: Option<PathBuf>,

    /// Log probe and replay details to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Probe the backend and show the connection banner
    Status,

    /// List movies
    #[command(after_help = colors::examples("\
Examples:
  marquee list                              First page
  marquee list --page 2 --limit 50          Later pages
  marquee list --genre Drama                One genre
  marquee list --sort rating-desc           Best rated first
  marquee list --format json                Machine-readable"))]
    List {
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Movies per page
        #[arg(
            long,
            short = 'n',
            default_value_t = DEFAULT_LIMIT,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_LIMIT))
        )]
        limit: u32,

        /// Only movies of this genre
        #[arg(long, short, value_parser = non_empty_string)]
        genre: Option<String>,

        /// Sort order
        #[arg(long, short, value_enum)]
        sort: Option<SortArg>,

        /// Output format (text, json)
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a movie
    #[command(after_help = colors::examples("\
Examples:
  marquee add --title \"Heat\" --genre Crime --rating 8.3
  marquee add --title \"Alien\" --description \"In space...\""))]
    Add {
        #[command(flatten)]
        fields: MovieFields,
    },

    /// Change fields of a movie
    #[command(
        arg_required_else_help = true,
        after_help = colors::examples("\
Examples:
  marquee edit 12 --rating 9                Change the rating
  marquee edit 12 --genre none              Clear the genre")
    )]
    Edit {
        /// Movie id
        id: MovieId,

        #[command(flatten)]
        fields: MovieFields,
    },

    /// Delete a movie
    #[command(arg_required_else_help = true)]
    Delete {
        /// Movie id
        id: MovieId,
    },

    /// Show operations waiting to be replayed
    Queue {
        /// Output format (text, json)
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Replay queued operations now
    Sync,

    /// Keep probing and syncing until interrupted
    Watch,
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
