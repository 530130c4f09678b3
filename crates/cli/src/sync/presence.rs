// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Network presence.
//!
//! There is no portable "network changed" notification, so presence is
//! polled: a UDP socket is connected to a documentation address, which asks
//! the OS for a route without sending anything. Only edges are reported.

use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::connectivity::NetworkEvent;

/// TEST-NET-1 (RFC 5737); never routed, so nothing leaves the host.
const ROUTE_PROBE: SocketAddrV4 = SocketAddrV4::new(Ipv4Addr::new(192, 0, 2, 1), 9);

/// Returns true if the OS has a route off this host.
pub async fn network_available() -> bool {
    let Ok(socket) = UdpSocket::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))).await else {
        return false;
    };
    socket.connect(ROUTE_PROBE).await.is_ok()
}

/// Polls [`network_available`] every `interval` and sends a
/// [`NetworkEvent`] on each change, until cancelled or the receiver is gone.
pub async fn watch_presence(
    tx: mpsc::Sender<NetworkEvent>,
    interval: Duration,
    cancel: CancellationToken,
) {
    watch_with(network_available, tx, interval, cancel).await;
}

/// The network is assumed up until a check says otherwise.
async fn watch_with<F, Fut>(
    check: F,
    tx: mpsc::Sender<NetworkEvent>,
    interval: Duration,
    cancel: CancellationToken,
) where
    F: Fn() -> Fut,
    Fut: Future<Output = bool>,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut up = true;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let now_up = check().await;
        if now_up == up {
            continue;
        }
        up = now_up;

        let event = if up {
            NetworkEvent::Online
        } else {
            NetworkEvent::Offline
        };
        debug!(?event, "network presence changed");
        if tx.send(event).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
#[path = "presence_tests.rs"]
mod tests;
