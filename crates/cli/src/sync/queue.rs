// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mutation queue for persisting changes made while disconnected.
//!
//! Uses JSONL format for durability - each operation is written as a single
//! line and fsynced immediately. On reconnect, queued operations are replayed
//! against the server in order.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use mq_core::{jsonl, QueuedOperation};
use tracing::warn;

/// Error type for queue operations.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage error from the JSONL layer.
    #[error("queue storage error: {0}")]
    Storage(#[from] mq_core::Error),
}

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// Durable FIFO of pending mutations.
///
/// Operations are stored in a JSONL file, one operation per line, in replay
/// order. Entries are never rewritten individually: the queue only grows
/// until a successful drain clears it.
pub struct MutationQueue {
    /// Path to the queue file.
    path: PathBuf,
}

impl MutationQueue {
    /// Create or open a mutation queue at the given path.
    pub fn open(path: &Path) -> QueueResult<Self> {
        OpenOptions::new().create(true).append(true).open(path)?;

        Ok(MutationQueue {
            path: path.to_path_buf(),
        })
    }

    /// Path to the queue file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends an operation.
    ///
    /// Structurally invalid operations are logged and dropped; the return
    /// value says whether `op` was queued. Only I/O failures are errors.
    pub fn enqueue(&self, op: &QueuedOperation) -> QueueResult<bool> {
        if let Err(e) = op.validate() {
            warn!(kind = %op.kind, id = ?op.id, error = %e, "invalid operation, not queued");
            return Ok(false);
        }

        jsonl::append(&self.path, op)?;
        Ok(true)
    }

    /// Reads all queued operations without removing them.
    pub fn drain(&self) -> QueueResult<Vec<QueuedOperation>> {
        Ok(jsonl::read_all(&self.path)?)
    }

    /// Clear all queued operations.
    ///
    /// Call this only after every queued operation was acknowledged.
    pub fn clear(&self) -> QueueResult<()> {
        Ok(jsonl::write_all::<QueuedOperation>(&self.path, &[])?)
    }

    /// Get the number of queued operations.
    pub fn len(&self) -> QueueResult<usize> {
        Ok(self.drain()?.len())
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> QueueResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
