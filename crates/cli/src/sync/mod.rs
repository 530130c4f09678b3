// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline-first sync runtime for the movie catalog.
//!
//! Mutations made while the backend is unreachable are persisted to a FIFO
//! queue and applied to a local cache; when the backend comes back the
//! queue is replayed in order and the cache reconciled with the server.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  status   ┌──────────────┐  calls   ┌─────────────┐
//! │ Connectivity │──────────►│ Coordinator  │─────────►│   Remote    │
//! │   Monitor    │           │ (drain loop) │◄─────────│  (trait)    │
//! └──────────────┘           └──────────────┘          └─────────────┘
//!        ▲                      │        │
//!        │ network events       ▼        ▼
//! ┌──────────────┐       ┌──────────┐ ┌──────────┐
//! │   Presence   │       │  Queue   │ │  Store   │
//! │   watcher    │       │ (JSONL)  │ │ (JSONL)  │
//! └──────────────┘       └──────────┘ └──────────┘
//! ```
//!
//! # Features
//!
//! - Bounded health probes combined with network presence
//! - Persisted mutation queue replayed in FIFO order, halting on failure
//! - Temporary ids for offline creates, rewritten once the server assigns one
//! - Local-wins merge of cached edits over server records
//! - Injectable remote trait for testing

mod connectivity;
mod context;
mod coordinator;
mod presence;
mod queue;
mod remote;
mod runner;
mod store;

pub use connectivity::{
    ConnectivityMonitor, ListenerRegistry, NetworkEvent, SharedStatus, Subscription,
};
pub use context::SyncContext;
pub use coordinator::{
    DrainOutcome, Listing, ListingSource, MutationOutcome, SkipReason, SyncCoordinator, SyncEvent,
    SyncState,
};
pub use presence::{network_available, watch_presence};
pub use queue::{MutationQueue, QueueError};
pub use remote::{bounded, HttpRemote, Remote, RemoteError, RemoteFuture, RemoteResult};
pub use runner::run;
pub use store::{LocalMovieStore, StoreError};

/// Error type for sync operations.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Core(#[from] mq_core::Error),

    /// Another process owns the state directory.
    #[error("state directory is in use by another process (lock: {0})")]
    LockHeld(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
pub(crate) mod test_helpers;
