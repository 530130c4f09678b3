// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Long-running sync: presence watcher, health probes and the drain loop,
//! until Ctrl-C.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tracing::{info, warn};

use crate::colors;
use crate::display::format_pending;
use crate::error::Result;
use crate::sync::{self, watch_presence, NetworkEvent, Remote, SyncEvent};

use super::Session;

const NETWORK_CAPACITY: usize = 4;

pub async fn run<R: Remote + 'static>(session: &Session<R>) -> Result<()> {
    let (tx, rx) = mpsc::channel(NETWORK_CAPACITY);
    let presence = tokio::spawn(watch_presence(
        tx,
        session.config.sync.health_interval(),
        session.cancel.child_token(),
    ));

    let cancel = session.cancel.clone();
    let interrupt = tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("interrupted"),
            Err(e) => warn!(error = %e, "cannot listen for Ctrl-C"),
        }
        cancel.cancel();
    });

    let result = watch_with(session, rx).await;
    presence.abort();
    interrupt.abort();
    result
}

/// Runs the monitor and drain loop on `network` events until the session
/// is cancelled, printing status banners and sync results.
pub(crate) async fn watch_with<R: Remote + 'static>(
    session: &Session<R>,
    network: mpsc::Receiver<NetworkEvent>,
) -> Result<()> {
    println!(
        "watching {} ({})",
        session.config.backend_url,
        format_pending(session.pending_count()?)
    );

    let banners = session
        .monitor
        .subscribe(|status| println!("{}", colors::banner(status)));
    let printer = tokio::spawn(print_events(session.coordinator.subscribe()));

    let monitor = Arc::clone(&session.monitor);
    let interval = session.config.sync.health_interval();
    let probing = tokio::spawn(async move { monitor.run(network, interval).await });

    sync::run(
        Arc::clone(&session.coordinator),
        &session.monitor,
        session.cancel.clone(),
    )
    .await;

    session.monitor.unsubscribe(banners);
    session.cancel.cancel();
    if let Err(e) = probing.await {
        warn!(error = %e, "monitor task ended abnormally");
    }
    printer.abort();
    Ok(())
}

async fn print_events(mut events: broadcast::Receiver<SyncEvent>) {
    loop {
        match events.recv().await {
            Ok(SyncEvent::Synced { movies }) => {
                println!("synced; {} movies on the server", movies.len());
            }
            Ok(SyncEvent::Failed { error }) => {
                println!("{}", colors::bad(&format!("sync failed: {error}")));
            }
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
