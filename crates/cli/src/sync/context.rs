// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-session sync state.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mq_core::TempIdClock;

use super::connectivity::SharedStatus;
use super::queue::MutationQueue;
use super::remote::Remote;
use super::store::LocalMovieStore;
use super::{SyncError, SyncResult};
use crate::config::SyncConfig;

const QUEUE_FILE_NAME: &str = "queue.jsonl";
const CACHE_FILE_NAME: &str = "movies.jsonl";
const LOCK_FILE_NAME: &str = "state.lock";

/// Everything a sync session owns: the persisted queue and cache, the
/// remote, the status handle and the temporary id clock.
///
/// One process at a time may own a state directory; the context holds an
/// exclusive lock on `state.lock` for its lifetime.
pub struct SyncContext<R: Remote> {
    pub config: SyncConfig,
    pub status: Arc<SharedStatus>,
    pub queue: MutationQueue,
    pub store: LocalMovieStore,
    pub remote: Arc<R>,
    pub ids: TempIdClock,
    state_dir: PathBuf,
    _lock: File,
}

impl<R: Remote> SyncContext<R> {
    /// Opens (creating if needed) the state in `state_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::LockHeld`] if another process owns the directory.
    pub fn open(
        state_dir: &Path,
        config: SyncConfig,
        remote: Arc<R>,
        status: Arc<SharedStatus>,
    ) -> SyncResult<Self> {
        fs::create_dir_all(state_dir)?;
        let lock = acquire_lock(&state_dir.join(LOCK_FILE_NAME))?;

        let queue = MutationQueue::open(&state_dir.join(QUEUE_FILE_NAME))?;
        let store = LocalMovieStore::open(&state_dir.join(CACHE_FILE_NAME));

        let ids = TempIdClock::new();
        for movie in store.get()? {
            ids.observe(movie.id);
        }
        for op in queue.drain()? {
            if let Some(id) = op.id {
                ids.observe(id);
            }
        }

        Ok(SyncContext {
            config,
            status,
            queue,
            store,
            remote,
            ids,
            state_dir: state_dir.to_path_buf(),
            _lock: lock,
        })
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }
}

fn acquire_lock(lock_path: &Path) -> SyncResult<File> {
    use fs2::FileExt;

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)?;

    file.try_lock_exclusive()
        .map_err(|_| SyncError::LockHeld(lock_path.display().to_string()))?;

    Ok(file)
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
