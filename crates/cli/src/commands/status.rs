// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use mq_core::ConnectionStatus;

use crate::colors;
use crate::display::format_pending;
use crate::error::Result;
use crate::sync::{Remote, SyncState};

use super::{print_lines, Session};

pub async fn run<R: Remote>(session: &Session<R>) -> Result<()> {
    let status = session.monitor.probe().await;
    let pending = session.pending_count()?;
    print_lines(&report(
        status,
        pending,
        session.coordinator.state(),
        &session.config.backend_url,
    ));
    Ok(())
}

/// Banner, backend and queue summary.
pub(crate) fn report(
    status: ConnectionStatus,
    pending: usize,
    state: SyncState,
    backend_url: &str,
) -> Vec<String> {
    let mut lines = vec![
        colors::banner(status),
        format!("  backend: {}", colors::context(backend_url)),
        format!("  queue:   {}", format_pending(pending)),
    ];
    if state == SyncState::Failed {
        lines.push(colors::bad("  last sync failed; run 'marquee sync' to retry"));
    }
    lines
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
