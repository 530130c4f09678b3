// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! marquee - an offline-first client for a movie catalog service.
//!
//! Changes made while the backend is unreachable are queued on disk and
//! applied to a local cache; once the backend answers again the queue is
//! replayed in order and the cache reconciled with the server.
//!
//! # Main Components
//!
//! - [`sync`] - Connectivity monitor, persisted queue, cache and drain loop
//! - [`Config`] - Backend location, credentials and sync timing
//! - [`Cli`] - Command-line surface
//! - [`Error`] - Error types for all operations
//!
//! # Embedding
//!
//! ```rust,ignore
//! use clap::Parser;
//! use marquee::Cli;
//!
//! marquee::run(Cli::parse())?;
//! ```

mod cli;
pub mod colors;
mod commands;
mod display;
pub mod help;
mod logging;

pub mod config;
pub mod env;
pub mod error;
pub mod sync;

pub use cli::{Cli, Command, MovieFields, OutputFormat, SortArg};
pub use config::Config;
pub use error::{Error, Result};

use mq_core::MovieQuery;

use crate::commands::Session;
use crate::logging::Verbosity;

/// Execute a CLI invocation. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(cli: Cli) -> Result<()> {
    let config = commands::load_config(cli.config.as_deref(), cli.state_dir.as_deref())?;

    let watching = matches!(cli.command, Command::Watch);
    let log_file = config.log_file.as_deref().filter(|_| watching);
    logging::init(verbosity(cli.verbose, watching), log_file);

    let session = Session::open(config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(dispatch(&session, cli.command))
}

fn verbosity(verbose: bool, watching: bool) -> Verbosity {
    if verbose {
        Verbosity::Verbose
    } else if watching {
        Verbosity::Normal
    } else {
        Verbosity::Quiet
    }
}

async fn dispatch(session: &Session<sync::HttpRemote>, command: Command) -> Result<()> {
    match command {
        Command::Status => commands::status::run(session).await,
        Command::List {
            page,
            limit,
            genre,
            sort,
            format,
        } => {
            let query = MovieQuery {
                genre,
                sort: sort.map(Into::into),
                ..MovieQuery::page(page, limit)
            };
            commands::list::run(session, query, format).await
        }
        Command::Add { fields } => commands::add::run(session, fields).await,
        Command::Edit { id, fields } => commands::edit::run(session, id, fields).await,
        Command::Delete { id } => commands::delete::run(session, id).await,
        Command::Queue { format } => commands::queue::run(session, format),
        Command::Sync => commands::sync::run(session).await,
        Command::Watch => commands::watch::run(session).await,
    }
}
