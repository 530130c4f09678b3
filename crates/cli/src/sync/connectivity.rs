// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity tracking.
//!
//! The monitor combines two signals into one [`ConnectionStatus`]:
//! - network presence, delivered as [`NetworkEvent`]s
//! - a bounded health probe of the backend, run on an interval and on every
//!   network "online" event
//!
//! A network "offline" event sets `NetworkOffline` directly, without a probe.
//! Listeners are only told about actual changes.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mq_core::ConnectionStatus;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::remote::{Remote, RemoteError};

const STATUS_ONLINE: u8 = 0;
const STATUS_NETWORK_OFFLINE: u8 = 1;
const STATUS_SERVER_OFFLINE: u8 = 2;

fn encode(status: ConnectionStatus) -> u8 {
    match status {
        ConnectionStatus::Online => STATUS_ONLINE,
        ConnectionStatus::NetworkOffline => STATUS_NETWORK_OFFLINE,
        ConnectionStatus::ServerOffline => STATUS_SERVER_OFFLINE,
    }
}

fn decode(value: u8) -> ConnectionStatus {
    match value {
        STATUS_ONLINE => ConnectionStatus::Online,
        STATUS_NETWORK_OFFLINE => ConnectionStatus::NetworkOffline,
        _ => ConnectionStatus::ServerOffline,
    }
}

/// Connection status visible to every component.
///
/// Uses an atomic field for lock-free reads from other tasks.
pub struct SharedStatus {
    state: AtomicU8,
}

impl SharedStatus {
    /// Create a new shared status.
    ///
    /// Starts as `ServerOffline`: nothing is known to be reachable until a
    /// probe says so.
    pub fn new() -> Self {
        Self::with_status(ConnectionStatus::ServerOffline)
    }

    pub fn with_status(status: ConnectionStatus) -> Self {
        Self {
            state: AtomicU8::new(encode(status)),
        }
    }

    /// Get the current status.
    pub fn get(&self) -> ConnectionStatus {
        decode(self.state.load(Ordering::Acquire))
    }

    /// Store `status`, returning the previous value.
    pub fn swap(&self, status: ConnectionStatus) -> ConnectionStatus {
        decode(self.state.swap(encode(status), Ordering::AcqRel))
    }

    pub fn is_online(&self) -> bool {
        self.get().is_online()
    }
}

impl Default for SharedStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Token returned by [`ListenerRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Arc<dyn Fn(ConnectionStatus) + Send + Sync>;

/// Status-change observers, called in registration order.
pub struct ListenerRegistry {
    next: AtomicU64,
    listeners: Mutex<Vec<(Subscription, Listener)>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Registers `listener` and returns its unsubscribe token.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(ConnectionStatus) + Send + Sync + 'static,
    {
        let token = Subscription(self.next.fetch_add(1, Ordering::Relaxed));
        self.lock().push((token, Arc::new(listener)));
        token
    }

    /// Removes a listener. Unsubscribing twice is harmless.
    ///
    /// Returns true if the token was still registered.
    pub fn unsubscribe(&self, token: Subscription) -> bool {
        let mut listeners = self.lock();
        let before = listeners.len();
        listeners.retain(|(t, _)| *t != token);
        listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls every listener with `status`.
    ///
    /// Listeners run synchronously on the caller's task, outside the
    /// registry lock, so they may subscribe or unsubscribe.
    pub fn notify(&self, status: ConnectionStatus) {
        let snapshot: Vec<Listener> = self.lock().iter().map(|(_, l)| Arc::clone(l)).collect();
        for listener in snapshot {
            listener(status);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Subscription, Listener)>> {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Network presence changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkEvent {
    Online,
    Offline,
}

/// Tracks backend reachability and broadcasts status changes.
pub struct ConnectivityMonitor<R: Remote> {
    remote: Arc<R>,
    status: Arc<SharedStatus>,
    network_up: AtomicBool,
    listeners: ListenerRegistry,
    health_timeout: Duration,
    cancel: CancellationToken,
}

impl<R: Remote> ConnectivityMonitor<R> {
    pub fn new(remote: Arc<R>, health_timeout: Duration, cancel: CancellationToken) -> Self {
        Self {
            remote,
            status: Arc::new(SharedStatus::new()),
            network_up: AtomicBool::new(true),
            listeners: ListenerRegistry::new(),
            health_timeout,
            cancel,
        }
    }

    /// Current status, without probing.
    pub fn current_status(&self) -> ConnectionStatus {
        self.status.get()
    }

    /// Handle for components that only read the status.
    pub fn shared_status(&self) -> Arc<SharedStatus> {
        Arc::clone(&self.status)
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(ConnectionStatus) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&self, token: Subscription) -> bool {
        self.listeners.unsubscribe(token)
    }

    /// The network went away: `NetworkOffline` without probing.
    pub fn network_offline(&self) -> ConnectionStatus {
        self.network_up.store(false, Ordering::Release);
        self.update(ConnectionStatus::NetworkOffline);
        ConnectionStatus::NetworkOffline
    }

    /// The network came back: probe the backend.
    pub async fn network_online(&self) -> ConnectionStatus {
        self.network_up.store(true, Ordering::Release);
        self.probe().await
    }

    /// Recomputes the status and notifies listeners if it changed.
    ///
    /// Never fails: every probe problem resolves to `ServerOffline`. If the
    /// monitor is cancelled mid-probe the status is left unchanged.
    pub async fn probe(&self) -> ConnectionStatus {
        if !self.network_up.load(Ordering::Acquire) {
            self.update(ConnectionStatus::NetworkOffline);
            return ConnectionStatus::NetworkOffline;
        }

        match self.check_health().await {
            Some(status) => {
                self.update(status);
                status
            }
            None => self.current_status(),
        }
    }

    /// Runs one bounded health probe. `None` means cancelled.
    async fn check_health(&self) -> Option<ConnectionStatus> {
        let probe = self.cancel.child_token();
        let result = tokio::select! {
            _ = probe.cancelled() => return None,
            result = tokio::time::timeout(self.health_timeout, self.remote.health()) => result,
        };

        let status = match result {
            Ok(Ok(body)) if body.is_object() => ConnectionStatus::Online,
            Ok(Ok(body)) => {
                debug!(%body, "health response is not an object");
                ConnectionStatus::ServerOffline
            }
            Ok(Err(e)) => {
                debug!(error = %e, "health probe failed");
                ConnectionStatus::ServerOffline
            }
            Err(_) => {
                let e = RemoteError::Timeout(self.health_timeout);
                debug!(error = %e, "health probe failed");
                ConnectionStatus::ServerOffline
            }
        };
        Some(status)
    }

    /// Stores `next` and notifies listeners if it differs from the previous
    /// status. Returns true on a change.
    fn update(&self, next: ConnectionStatus) -> bool {
        let previous = self.status.swap(next);
        if previous == next {
            return false;
        }
        info!(from = %previous, to = %next, "connection status changed");
        self.listeners.notify(next);
        true
    }

    /// Probes on start, then every `interval` and on network events, until
    /// cancelled.
    pub async fn run(&self, mut network: mpsc::Receiver<NetworkEvent>, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let mut network_open = true;

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = ticker.tick() => {
                    self.probe().await;
                }
                event = network.recv(), if network_open => match event {
                    Some(NetworkEvent::Offline) => {
                        self.network_offline();
                    }
                    Some(NetworkEvent::Online) => {
                        self.network_online().await;
                    }
                    None => network_open = false,
                },
            }
        }
        debug!("connectivity monitor stopped");
    }
}

#[cfg(test)]
#[path = "connectivity_tests.rs"]
mod tests;
