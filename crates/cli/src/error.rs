// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::sync::{RemoteError, SyncError};

/// All possible errors that can occur in the marquee library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid movie id: {0}\n  hint: movie ids must be positive integers")]
    InvalidMovieId(i64),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("invalid sort order: '{0}'\n  hint: valid orders are: title-asc, title-desc, rating-asc, rating-desc")]
    InvalidSortOrder(String),

    #[error("invalid connection status: '{0}'")]
    InvalidStatus(String),

    #[error("nothing to change\n  hint: pass at least one of --title, --description, --image, --genre, --rating")]
    NothingToEdit,

    #[error("sync stopped at {op}: {error}\n  hint: the queue is kept; run 'marquee sync' again once the backend recovers")]
    SyncHalted { op: String, error: String },

    #[error("server rejected the request: {0}")]
    Rejected(RemoteError),

    #[error("remote error: {0}")]
    Remote(RemoteError),

    #[error("state directory is in use by another process (lock: {0})\n  hint: stop 'marquee watch' or pass a different --state-dir")]
    LockHeld(String),

    #[error("local state error: {0}")]
    Storage(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

/// A specialized Result type for marquee operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<mq_core::Error> for Error {
    fn from(e: mq_core::Error) -> Self {
        match e {
            mq_core::Error::InvalidOperation(s) => Error::InvalidOperation(s),
            mq_core::Error::InvalidMovieId(id) => Error::InvalidMovieId(id),
            mq_core::Error::InvalidSortOrder(s) => Error::InvalidSortOrder(s),
            mq_core::Error::InvalidStatus(s) => Error::InvalidStatus(s),
            mq_core::Error::Io(e) => Error::Io(e),
            mq_core::Error::Json(e) => Error::Json(e),
        }
    }
}

impl From<SyncError> for Error {
    fn from(e: SyncError) -> Self {
        match e {
            SyncError::Remote(e) if e.is_rejection() => Error::Rejected(e),
            SyncError::Remote(e) => Error::Remote(e),
            SyncError::Core(e) => Error::from(e),
            SyncError::LockHeld(path) => Error::LockHeld(path),
            SyncError::Io(e) => Error::Io(e),
            e @ (SyncError::Queue(_) | SyncError::Store(_)) => Error::Storage(e.to_string()),
        }
    }
}

impl From<RemoteError> for Error {
    fn from(e: RemoteError) -> Self {
        Error::from(SyncError::Remote(e))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
