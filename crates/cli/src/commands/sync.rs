// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::colors;
use crate::display::format_pending;
use crate::error::{Error, Result};
use crate::sync::{DrainOutcome, Remote, SkipReason};

use super::{print_lines, Session};

/// Replays the queue now if the backend is reachable.
pub async fn run<R: Remote>(session: &Session<R>) -> Result<()> {
    let status = session.monitor.probe().await;
    if !status.is_online() {
        print_lines(&[
            colors::banner(status),
            format_pending(session.pending_count()?),
        ]);
        return Ok(());
    }

    let outcome = session.coordinator.drain().await?;
    if let DrainOutcome::Halted { failed, error, .. } = &outcome {
        let op = match failed.id {
            Some(id) => format!("{} #{id}", failed.kind),
            None => failed.kind.to_string(),
        };
        return Err(Error::SyncHalted {
            op,
            error: error.clone(),
        });
    }
    println!("{}", describe(&outcome));
    Ok(())
}

pub(crate) fn describe(outcome: &DrainOutcome) -> String {
    match outcome {
        DrainOutcome::Skipped(SkipReason::NothingPending) => "nothing to sync".to_string(),
        DrainOutcome::Skipped(SkipReason::InFlight) => "a sync is already running".to_string(),
        DrainOutcome::Skipped(SkipReason::Offline) => "backend unreachable, nothing sent".to_string(),
        DrainOutcome::Synced { replayed, movies } => format!(
            "synced {replayed} {}; {} movies on the server",
            operations(*replayed),
            movies.len()
        ),
        DrainOutcome::Halted {
            replayed, error, ..
        } => colors::bad(&format!(
            "sent {replayed} {} before failing: {error}",
            operations(*replayed)
        )),
        DrainOutcome::Unreconciled { replayed, error } => colors::warn(&format!(
            "synced {replayed} {}; refreshing the local view failed: {error}",
            operations(*replayed)
        )),
    }
}

fn operations(n: usize) -> &'static str {
    if n == 1 {
        "operation"
    } else {
        "operations"
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
