// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing subscriber setup.

use std::fs;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::env;

/// How chatty a command should be when `RUST_LOG` is not set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// One-shot commands: only problems.
    Quiet,
    /// Long-running commands: status transitions and drain results.
    Normal,
    /// `--verbose`: probe and replay details.
    Verbose,
}

impl Verbosity {
    pub fn directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "warn",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
        }
    }
}

/// Builds the filter: `RUST_LOG` wins, then `--verbose`, then the
/// command's default.
pub fn filter_for(verbosity: Verbosity) -> EnvFilter {
    if env::log_filter_set() {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return filter;
        }
    }
    EnvFilter::new(verbosity.directive())
}

/// Installs the global subscriber.
///
/// Logs go to `log_file` when it can be opened for append, otherwise to
/// stderr. Calling this twice is harmless; the first subscriber stays.
pub fn init(verbosity: Verbosity, log_file: Option<&Path>) {
    let filter = filter_for(verbosity);

    let file = log_file.and_then(|path| {
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });

    let _ = match file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false)
            .try_init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
