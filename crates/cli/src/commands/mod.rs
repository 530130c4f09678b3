// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod add;
pub mod delete;
pub mod edit;
pub mod list;
pub mod queue;
pub mod status;
pub mod sync;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;
pub mod watch;

use std::path::Path;
use std::sync::Arc;

use mq_core::{ConnectionStatus, MovieId};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::colors;
use crate::config::Config;
use crate::display::format_movie_details;
use crate::error::Result;
use crate::sync::{
    ConnectivityMonitor, HttpRemote, MutationOutcome, Remote, SyncContext, SyncCoordinator,
};

/// Everything a command needs: configuration, the connectivity monitor and
/// the coordinator that owns the state directory.
pub struct Session<R: Remote> {
    pub config: Config,
    pub monitor: Arc<ConnectivityMonitor<R>>,
    pub coordinator: Arc<SyncCoordinator<R>>,
    pub cancel: CancellationToken,
}

impl Session<HttpRemote> {
    /// Opens a session against the configured HTTP backend.
    pub fn open(config: Config) -> Result<Self> {
        let remote = Arc::new(HttpRemote::new(&config)?);
        Session::new(config, remote, CancellationToken::new())
    }
}

impl<R: Remote> Session<R> {
    pub fn new(config: Config, remote: Arc<R>, cancel: CancellationToken) -> Result<Self> {
        let monitor = Arc::new(ConnectivityMonitor::new(
            Arc::clone(&remote),
            config.sync.health_timeout(),
            cancel.child_token(),
        ));
        let ctx = SyncContext::open(
            &config.resolve_state_dir(),
            config.sync.clone(),
            remote,
            monitor.shared_status(),
        )?;
        debug!(state_dir = %ctx.state_dir().display(), "session opened");

        Ok(Session {
            config,
            monitor,
            coordinator: Arc::new(SyncCoordinator::new(ctx)),
            cancel,
        })
    }

    /// Probes the backend and, when it is reachable, replays anything left
    /// in the queue before the command does its own work.
    pub async fn connect(&self) -> Result<ConnectionStatus> {
        let status = self.monitor.probe().await;
        let outcome = self.coordinator.on_status_change(status).await?;
        debug!(%status, ?outcome, "connected");
        Ok(status)
    }

    pub fn pending_count(&self) -> Result<usize> {
        Ok(self.coordinator.pending()?.len())
    }
}

/// Loads configuration, letting `--state-dir` override the file and
/// environment.
pub fn load_config(path: Option<&Path>, state_dir: Option<&Path>) -> Result<Config> {
    let mut config = Config::load(path)?;
    if let Some(dir) = state_dir {
        config.state_dir = Some(dir.to_path_buf());
    }
    Ok(config)
}

/// Lines confirming a mutation.
fn report_outcome(verb: &str, id: Option<MovieId>, outcome: &MutationOutcome) -> Vec<String> {
    match outcome {
        MutationOutcome::Sent(Some(movie)) => {
            let mut lines = vec![format!("{verb} #{}", movie.id)];
            lines.extend(format_movie_details(movie));
            lines
        }
        MutationOutcome::Sent(None) => match id {
            Some(id) => vec![format!("{verb} #{id}")],
            None => vec![verb.to_string()],
        },
        MutationOutcome::Queued { id } => vec![colors::warn(&format!(
            "queued: #{id} will be {verb} when the backend is reachable"
        ))],
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
