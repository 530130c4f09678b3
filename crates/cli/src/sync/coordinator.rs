// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mutation routing and queue replay.
//!
//! Mutations go straight to the server when it is reachable and nothing is
//! queued ahead of them. Otherwise, or when that call fails for any reason,
//! they are queued and applied to the local cache so the user sees them
//! immediately.
//!
//! Draining replays the queue in FIFO order:
//! 1. The first failing call halts the round; the queue stays exactly as it
//!    was and the state becomes `Failed`
//! 2. When every call succeeded the queue is cleared, the full server
//!    collection is fetched and merged with the cache, and the cache is
//!    cleared
//!
//! Replay is at-least-once: a call the server applied but never acknowledged
//! is sent again on the next round.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use mq_core::query::filter_genre;
use mq_core::{
    merge, Apply, ConnectionStatus, Movie, MovieId, MoviePage, MoviePatch, MovieQuery, Mutation,
    OpKind, QueuedOperation,
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::context::SyncContext;
use super::remote::{bounded, Remote, RemoteError, RemoteResult};
use super::SyncResult;

const STATE_IDLE: u8 = 0;
const STATE_DRAINING: u8 = 1;
const STATE_FAILED: u8 = 2;

const EVENT_CAPACITY: usize = 16;

/// Where the coordinator is in its drain cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Draining,
    /// The last round halted on a failed call. The next trigger retries.
    Failed,
}

impl SyncState {
    fn encode(self) -> u8 {
        match self {
            SyncState::Idle => STATE_IDLE,
            SyncState::Draining => STATE_DRAINING,
            SyncState::Failed => STATE_FAILED,
        }
    }

    fn decode(value: u8) -> Self {
        match value {
            STATE_DRAINING => SyncState::Draining,
            STATE_FAILED => SyncState::Failed,
            _ => SyncState::Idle,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SyncState::Idle => "idle",
            SyncState::Draining => "draining",
            SyncState::Failed => "failed",
        }
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a drain did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Offline,
    InFlight,
    NothingPending,
}

/// Result of a drain attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum DrainOutcome {
    Skipped(SkipReason),
    /// Every queued call succeeded and the view was reconciled.
    Synced { replayed: usize, movies: Vec<Movie> },
    /// A call failed; the queue is untouched.
    Halted {
        replayed: usize,
        failed: QueuedOperation,
        error: String,
    },
    /// Every queued call succeeded but fetching the server collection did
    /// not. The cache is reconciled on the next trigger.
    Unreconciled { replayed: usize, error: String },
}

/// Broadcast to `watch`-style observers.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    Synced { movies: Vec<Movie> },
    Failed { error: String },
}

/// What happened to a user mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    /// Accepted by the server. Carries the server's record, except for deletes.
    Sent(Option<Movie>),
    /// Queued for replay and applied to the local cache.
    Queued { id: MovieId },
}

/// Where a listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingSource {
    Server,
    Local,
}

/// A page of movies as the user should see it.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub page: MoviePage,
    pub source: ListingSource,
    pub pending: usize,
}

/// Holds the single-flight flag for the duration of a drain.
struct DrainGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> DrainGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| DrainGuard { flag })
    }
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

enum Replay {
    Complete(usize),
    Halted {
        replayed: usize,
        failed: QueuedOperation,
        error: RemoteError,
    },
}

/// Routes mutations and drains the queue.
pub struct SyncCoordinator<R: Remote> {
    ctx: SyncContext<R>,
    state: AtomicU8,
    draining: AtomicBool,
    events: broadcast::Sender<SyncEvent>,
}

impl<R: Remote> SyncCoordinator<R> {
    pub fn new(ctx: SyncContext<R>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            ctx,
            state: AtomicU8::new(STATE_IDLE),
            draining: AtomicBool::new(false),
            events,
        }
    }

    pub fn context(&self) -> &SyncContext<R> {
        &self.ctx
    }

    pub fn state(&self) -> SyncState {
        SyncState::decode(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: SyncState) {
        self.state.store(state.encode(), Ordering::Release);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.events.subscribe()
    }

    /// Queued operations in replay order.
    pub fn pending(&self) -> SyncResult<Vec<QueuedOperation>> {
        Ok(self.ctx.queue.drain()?)
    }

    /// Creates a movie.
    ///
    /// Offline, the record gets a temporary id until the server assigns one.
    pub async fn add_movie(&self, data: MoviePatch) -> SyncResult<MutationOutcome> {
        let temp = self.ctx.ids.next_id();
        let mutation = QueuedOperation::add(Some(temp), data.clamped()).validate()?;
        self.submit(mutation).await
    }

    pub async fn update_movie(&self, id: MovieId, data: MoviePatch) -> SyncResult<MutationOutcome> {
        let mutation = QueuedOperation::update(id, data.clamped()).validate()?;
        self.submit(mutation).await
    }

    pub async fn delete_movie(&self, id: MovieId) -> SyncResult<MutationOutcome> {
        let mutation = QueuedOperation::delete(id).validate()?;
        self.submit(mutation).await
    }

    async fn submit(&self, mutation: Mutation) -> SyncResult<MutationOutcome> {
        if self.ctx.status.is_online() && self.ctx.queue.is_empty()? {
            match self.send(&mutation).await {
                Ok(movie) => {
                    if mutation.kind() != OpKind::Add {
                        self.ctx.store.apply_mutations(&[mutation], &self.ctx.ids)?;
                    }
                    return Ok(MutationOutcome::Sent(movie));
                }
                // Already gone on the server.
                Err(RemoteError::NotFound) if mutation.kind() == OpKind::Delete => {
                    self.ctx.store.apply_mutations(&[mutation], &self.ctx.ids)?;
                    return Ok(MutationOutcome::Sent(None));
                }
                Err(e) => {
                    warn!(kind = %mutation.kind(), error = %e, "remote call failed, queueing");
                }
            }
        }
        self.record(mutation)
    }

    fn record(&self, mutation: Mutation) -> SyncResult<MutationOutcome> {
        let id = mutation.target().unwrap_or_default();
        let op = QueuedOperation::from(mutation.clone());
        if self.ctx.queue.enqueue(&op)? {
            self.ctx.store.apply_mutations(&[mutation], &self.ctx.ids)?;
        }
        debug!(kind = %op.kind, id, "mutation queued");
        Ok(MutationOutcome::Queued { id })
    }

    /// Status-change trigger: drains when the new status is `Online`.
    pub async fn on_status_change(&self, status: ConnectionStatus) -> SyncResult<DrainOutcome> {
        if !status.is_online() {
            return Ok(DrainOutcome::Skipped(SkipReason::Offline));
        }
        self.drain().await
    }

    /// Timer trigger: recovers from missed status changes.
    pub async fn on_tick(&self) -> SyncResult<DrainOutcome> {
        self.drain().await
    }

    /// Replays the queue if online, nothing else is draining, and there is
    /// pending work.
    pub async fn drain(&self) -> SyncResult<DrainOutcome> {
        if !self.ctx.status.is_online() {
            return Ok(DrainOutcome::Skipped(SkipReason::Offline));
        }
        let Some(_guard) = DrainGuard::acquire(&self.draining) else {
            debug!("drain already in flight");
            return Ok(DrainOutcome::Skipped(SkipReason::InFlight));
        };

        let ops = self.ctx.queue.drain()?;
        if ops.is_empty() && self.ctx.store.is_empty()? {
            return Ok(DrainOutcome::Skipped(SkipReason::NothingPending));
        }

        self.set_state(SyncState::Draining);
        let result = self.drain_round(&ops).await;
        match &result {
            Ok(DrainOutcome::Synced { .. }) => self.set_state(SyncState::Idle),
            _ => self.set_state(SyncState::Failed),
        }
        result
    }

    async fn drain_round(&self, ops: &[QueuedOperation]) -> SyncResult<DrainOutcome> {
        info!(queued = ops.len(), "draining mutation queue");

        let replayed = match self.replay(ops).await? {
            Replay::Complete(replayed) => replayed,
            Replay::Halted {
                replayed,
                failed,
                error,
            } => {
                warn!(kind = %failed.kind, id = ?failed.id, error = %error, replayed, "replay halted, queue kept");
                let error = error.to_string();
                let _ = self.events.send(SyncEvent::Failed {
                    error: error.clone(),
                });
                return Ok(DrainOutcome::Halted {
                    replayed,
                    failed,
                    error,
                });
            }
        };
        if !ops.is_empty() {
            self.ctx.queue.clear()?;
        }

        let server = match self.fetch_all().await {
            Ok(server) => server,
            Err(e) => {
                warn!(error = %e, replayed, "replayed queue but could not fetch server collection");
                let error = e.to_string();
                let _ = self.events.send(SyncEvent::Failed {
                    error: error.clone(),
                });
                return Ok(DrainOutcome::Unreconciled { replayed, error });
            }
        };

        let local = self.ctx.store.get()?;
        let movies = merge(&server, &local);
        self.ctx.store.clear()?;

        info!(replayed, movies = movies.len(), "sync complete");
        let _ = self.events.send(SyncEvent::Synced {
            movies: movies.clone(),
        });
        Ok(DrainOutcome::Synced { replayed, movies })
    }

    async fn replay(&self, ops: &[QueuedOperation]) -> SyncResult<Replay> {
        let mut pending: Vec<(usize, Mutation)> = Vec::with_capacity(ops.len());
        for (index, op) in ops.iter().enumerate() {
            match op.validate() {
                Ok(mutation) => pending.push((index, mutation)),
                Err(e) => warn!(kind = %op.kind, error = %e, "skipping invalid queued operation"),
            }
        }

        let mut replayed = 0;
        for current in 0..pending.len() {
            let (done, rest) = pending.split_at_mut(current + 1);
            let (origin, mutation) = &done[current];

            match (self.send(mutation).await, mutation) {
                (Ok(Some(created)), Mutation::Add { id: Some(temp), .. }) => {
                    let temp = *temp;
                    for (_, later) in rest.iter_mut() {
                        later.retarget(temp, created.id);
                    }
                    self.ctx.store.replace_id(temp, &created)?;
                    debug!(temp, id = created.id, "temporary id replaced");
                }
                (Ok(_), _) => {}
                (Err(RemoteError::NotFound), Mutation::Delete { id }) => {
                    debug!(id, "already deleted on server");
                }
                (Err(RemoteError::NotFound), Mutation::Update { id, .. }) => {
                    warn!(id, "update target no longer exists on server, skipping");
                }
                (Err(error), _) => {
                    return Ok(Replay::Halted {
                        replayed,
                        failed: ops[*origin].clone(),
                        error,
                    });
                }
            }
            replayed += 1;
        }

        Ok(Replay::Complete(replayed))
    }

    /// Sends one mutation, bounded by the request timeout.
    async fn send(&self, mutation: &Mutation) -> RemoteResult<Option<Movie>> {
        let limit = self.ctx.config.request_timeout();
        let remote = &self.ctx.remote;
        match mutation {
            Mutation::Add { data, .. } => bounded(limit, remote.create_movie(data)).await.map(Some),
            Mutation::Update { id, data } => {
                bounded(limit, remote.update_movie(*id, data)).await.map(Some)
            }
            Mutation::Delete { id } => bounded(limit, remote.delete_movie(*id)).await.map(|()| None),
        }
    }

    /// Fetches every page of the server collection.
    ///
    /// Stops on an empty or short page, once `total` records are in hand, or
    /// when a page brings no record not already seen. The page number the
    /// server echoes back is ignored.
    pub async fn fetch_all(&self) -> RemoteResult<Vec<Movie>> {
        let limit = self.ctx.config.request_timeout();
        let page_limit = self.ctx.config.page_limit();
        let mut movies = Vec::new();
        let mut seen = HashSet::new();
        let mut page = 1;

        loop {
            let query = MovieQuery::page(page, page_limit);
            let result = bounded(limit, self.ctx.remote.list_movies(&query)).await?;
            let short = result.data.len() < page_limit as usize;
            let before = movies.len();
            movies.extend(result.data.into_iter().filter(|m| seen.insert(m.id)));

            let stalled = movies.len() == before;
            if short || stalled || movies.len() as u64 >= result.total {
                break;
            }
            page += 1;
        }

        Ok(movies)
    }

    /// A page of movies with pending local changes applied.
    ///
    /// Online, the server page is merged with the cache; otherwise the page
    /// is computed from the cache alone.
    pub async fn refresh(&self, query: &MovieQuery) -> SyncResult<Listing> {
        let local = self.ctx.store.get()?;
        let ops = self.ctx.queue.drain()?;
        let pending = ops.len();

        if self.ctx.status.is_online() {
            let limit = self.ctx.config.request_timeout();
            match bounded(limit, self.ctx.remote.list_movies(query)).await {
                Ok(page) => {
                    return Ok(Listing {
                        page: self.overlay_page(page, &local, &ops, query),
                        source: ListingSource::Server,
                        pending,
                    });
                }
                Err(e) => warn!(error = %e, "server listing failed, using local cache"),
            }
        }

        Ok(Listing {
            page: query.run_local(&local),
            source: ListingSource::Local,
            pending,
        })
    }

    fn overlay_page(
        &self,
        mut page: MoviePage,
        local: &[Movie],
        ops: &[QueuedOperation],
        query: &MovieQuery,
    ) -> MoviePage {
        let created: HashSet<MovieId> = ops
            .iter()
            .filter(|op| op.kind == OpKind::Add)
            .filter_map(|op| op.id)
            .collect();
        let on_page: HashSet<MovieId> = page.data.iter().map(|m| m.id).collect();

        let edits: Vec<Movie> = local
            .iter()
            .filter(|m| on_page.contains(&m.id))
            .cloned()
            .collect();
        let mut data = merge(&page.data, &edits);

        // Pending edits of records the cache never held.
        for op in ops.iter().filter(|op| op.kind != OpKind::Add) {
            if let Ok(mutation) = op.validate() {
                data.apply(&mutation, &self.ctx.ids);
            }
        }
        let removed = page.data.len().saturating_sub(data.len()) as u64;

        let unsynced: Vec<Movie> = local
            .iter()
            .filter(|m| created.contains(&m.id) && !on_page.contains(&m.id))
            .cloned()
            .collect();
        let unsynced = match &query.genre {
            Some(genre) => filter_genre(&unsynced, genre),
            None => unsynced,
        };

        let last_page = !page.has_more();
        page.total = page.total.saturating_sub(removed) + unsynced.len() as u64;
        if last_page {
            data.extend(unsynced);
        }
        page.data = data;
        page
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
