// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Drain loop.
//!
//! Two producers feed one consumer:
//! 1. A status listener registered on the monitor
//! 2. A periodic tick, which recovers from missed status changes
//!
//! Triggers that pile up while a round is running are coalesced into one.

use std::sync::Arc;
use std::time::Duration;

use mq_core::ConnectionStatus;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::connectivity::ConnectivityMonitor;
use super::coordinator::{DrainOutcome, SyncCoordinator};
use super::remote::Remote;

const TRIGGER_CAPACITY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    StatusChanged(ConnectionStatus),
    Tick,
}

/// Runs drain rounds until `cancel` fires.
///
/// The listener is removed from `monitor` before returning.
pub async fn run<R: Remote>(
    coordinator: Arc<SyncCoordinator<R>>,
    monitor: &ConnectivityMonitor<R>,
    cancel: CancellationToken,
) {
    let (tx, mut rx) = mpsc::channel(TRIGGER_CAPACITY);

    let status_tx = tx.clone();
    let subscription = monitor.subscribe(move |status| {
        // A full channel already holds a pending trigger.
        let _ = status_tx.try_send(Trigger::StatusChanged(status));
    });

    let interval = coordinator.context().config.sync_interval();
    let ticker = tokio::spawn(tick(tx, interval, cancel.clone()));

    loop {
        let trigger = tokio::select! {
            _ = cancel.cancelled() => break,
            trigger = rx.recv() => match trigger {
                Some(trigger) => trigger,
                None => break,
            },
        };
        let trigger = coalesce(trigger, &mut rx);

        let result = match trigger {
            Trigger::StatusChanged(status) => coordinator.on_status_change(status).await,
            Trigger::Tick => coordinator.on_tick().await,
        };
        match result {
            Ok(DrainOutcome::Skipped(reason)) => debug!(?trigger, ?reason, "drain skipped"),
            Ok(DrainOutcome::Synced { replayed, movies }) => {
                info!(?trigger, replayed, movies = movies.len(), "drain round finished");
            }
            Ok(DrainOutcome::Halted { replayed, error, .. }) => {
                info!(?trigger, replayed, %error, "drain round halted");
            }
            Ok(DrainOutcome::Unreconciled { replayed, error }) => {
                info!(?trigger, replayed, %error, "drain round left cache unreconciled");
            }
            Err(e) => error!(?trigger, error = %e, "drain round failed"),
        }
    }

    monitor.unsubscribe(subscription);
    ticker.abort();
    debug!("drain loop stopped");
}

/// Folds queued triggers into one, keeping the latest status change.
fn coalesce(first: Trigger, rx: &mut mpsc::Receiver<Trigger>) -> Trigger {
    let mut trigger = first;
    while let Ok(next) = rx.try_recv() {
        trigger = match (trigger, next) {
            (_, status @ Trigger::StatusChanged(_)) => status,
            (status @ Trigger::StatusChanged(_), Trigger::Tick) => status,
            (Trigger::Tick, Trigger::Tick) => Trigger::Tick,
        };
    }
    trigger
}

async fn tick(tx: mpsc::Sender<Trigger>, interval: Duration, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if let Err(TrySendError::Closed(_)) = tx.try_send(Trigger::Tick) {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
