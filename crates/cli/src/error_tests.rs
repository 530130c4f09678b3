// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use std::time::Duration;

#[test]
fn test_error_invalid_movie_id_has_hint() {
    let msg = Error::InvalidMovieId(-3).to_string();
    assert!(msg.contains("-3"));
    assert!(msg.contains("hint: movie ids must be positive"));
}

#[test]
fn test_error_nothing_to_edit_lists_flags() {
    let msg = Error::NothingToEdit.to_string();
    assert!(msg.contains("--title"));
    assert!(msg.contains("--rating"));
}

#[test]
fn test_error_lock_held_has_hint() {
    let msg = Error::LockHeld("/tmp/state.lock".to_string()).to_string();
    assert!(msg.contains("/tmp/state.lock"));
    assert!(msg.contains("marquee watch"));
}

#[test]
fn test_from_core_error_keeps_kind() {
    let err: Error = mq_core::Error::InvalidMovieId(0).into();
    assert!(matches!(err, Error::InvalidMovieId(0)));

    let err: Error = mq_core::Error::InvalidSortOrder("newest".into()).into();
    assert!(matches!(err, Error::InvalidSortOrder(s) if s == "newest"));
}

#[test]
fn test_from_sync_error_splits_rejections() {
    let err: Error = SyncError::Remote(RemoteError::Status {
        status: 400,
        body: "bad".into(),
    })
    .into();
    assert!(matches!(err, Error::Rejected(_)));

    let err: Error = SyncError::Remote(RemoteError::Timeout(Duration::from_secs(1))).into();
    assert!(matches!(err, Error::Remote(RemoteError::Timeout(_))));
}

#[test]
fn test_from_sync_error_lock_and_core() {
    let err: Error = SyncError::LockHeld("x".into()).into();
    assert!(matches!(err, Error::LockHeld(p) if p == "x"));

    let err: Error = SyncError::Core(mq_core::Error::InvalidOperation("add requires data".into())).into();
    assert!(matches!(err, Error::InvalidOperation(_)));
}

#[test]
fn test_from_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();
    assert!(err.to_string().contains("io error"));
}

#[test]
fn test_sync_halted_names_operation() {
    let err = Error::SyncHalted {
        op: "update #12".to_string(),
        error: "request failed: connection reset".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.starts_with("sync stopped at update #12: request failed"));
    assert!(msg.contains("queue is kept"));
}
