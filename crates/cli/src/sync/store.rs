// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Durable client-side movie cache.
//!
//! Holds the records touched while changes were pending: offline creates
//! under their temporary ids and local edits. The whole snapshot is
//! rewritten on every change.

use std::path::{Path, PathBuf};

use mq_core::{jsonl, Apply, IdSource, Movie, MovieId, Mutation, QueuedOperation};
use tracing::{debug, warn};

/// Error type for cache operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Storage error from the JSONL layer.
    #[error("cache storage error: {0}")]
    Storage(#[from] mq_core::Error),
}

/// Result type for cache operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// JSONL-backed movie cache.
pub struct LocalMovieStore {
    path: PathBuf,
}

impl LocalMovieStore {
    pub fn open(path: &Path) -> Self {
        LocalMovieStore {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached records in insertion order.
    pub fn get(&self) -> StoreResult<Vec<Movie>> {
        Ok(jsonl::read_all(&self.path)?)
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.get()?.is_empty())
    }

    /// Applies queued operations in order and persists the result.
    ///
    /// Operations that fail validation are skipped. Returns how many
    /// operations changed the cache.
    pub fn apply(&self, ops: &[QueuedOperation], ids: &dyn IdSource) -> StoreResult<usize> {
        let mutations: Vec<Mutation> = ops
            .iter()
            .filter_map(|op| match op.validate() {
                Ok(mutation) => Some(mutation),
                Err(e) => {
                    warn!(kind = %op.kind, error = %e, "skipping invalid operation");
                    None
                }
            })
            .collect();
        self.apply_mutations(&mutations, ids)
    }

    /// Applies validated mutations in order and persists the result.
    pub fn apply_mutations(&self, mutations: &[Mutation], ids: &dyn IdSource) -> StoreResult<usize> {
        let mut movies = self.get()?;
        let changed = movies.apply_all(mutations, ids);
        jsonl::write_all(&self.path, &movies)?;
        debug!(changed, cached = movies.len(), "cache rewritten");
        Ok(changed)
    }

    /// Re-keys the record cached under a temporary id to the id the server
    /// assigned, keeping local field values.
    ///
    /// Returns false if nothing was cached under `temp`.
    pub fn replace_id(&self, temp: MovieId, created: &Movie) -> StoreResult<bool> {
        let mut movies = self.get()?;
        if !movies.iter().any(|m| m.id == temp) {
            return Ok(false);
        }

        movies.retain(|m| m.id == temp || m.id != created.id);
        for movie in movies.iter_mut().filter(|m| m.id == temp) {
            *movie = created.overlay(movie);
        }

        jsonl::write_all(&self.path, &movies)?;
        Ok(true)
    }

    /// Replaces the snapshot.
    pub fn replace(&self, movies: &[Movie]) -> StoreResult<()> {
        Ok(jsonl::write_all(&self.path, movies)?)
    }

    /// Empties the cache.
    pub fn clear(&self) -> StoreResult<()> {
        self.replace(&[])
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
