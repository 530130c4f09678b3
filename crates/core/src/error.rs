// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for mq-core operations.

use thiserror::Error;

/// All possible errors that can occur in mq-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("invalid movie id: {0}\n  hint: movie ids must be positive integers")]
    InvalidMovieId(i64),

    #[error("invalid sort order: '{0}'\n  hint: valid orders are: title-asc, title-desc, rating-asc, rating-desc")]
    InvalidSortOrder(String),

    #[error("invalid connection status: '{0}'")]
    InvalidStatus(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for mq-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
