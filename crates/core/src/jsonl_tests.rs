// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::movie::Movie;
use crate::op::QueuedOperation;
use tempfile::TempDir;

#[test]
fn read_all_returns_empty_for_missing_file() {
    let dir = TempDir::new().unwrap();
    let records: Vec<Movie> = read_all(&dir.path().join("missing.jsonl")).unwrap();
    assert!(records.is_empty());
}

#[test]
fn appends_preserve_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("queue.jsonl");

    append(&path, &QueuedOperation::delete(1)).unwrap();
    append(&path, &QueuedOperation::delete(2)).unwrap();
    append(&path, &QueuedOperation::delete(3)).unwrap();

    let ops: Vec<QueuedOperation> = read_all(&path).unwrap();
    let ids: Vec<_> = ops.iter().map(|op| op.id).collect();
    assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
}

#[test]
fn blank_lines_are_skipped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("movies.jsonl");
    std::fs::write(
        &path,
        "{\"id\":1,\"title\":\"A\"}\n\n   \n{\"id\":2,\"title\":\"B\"}\n",
    )
    .unwrap();

    let movies: Vec<Movie> = read_all(&path).unwrap();
    assert_eq!(movies.len(), 2);
}

#[test]
fn torn_final_line_is_ignored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("queue.jsonl");
    std::fs::write(&path, "{\"type\":\"delete\",\"id\":1}\n{\"type\":\"del").unwrap();

    let ops: Vec<QueuedOperation> = read_all(&path).unwrap();
    assert_eq!(ops, vec![QueuedOperation::delete(1)]);
}

#[test]
fn corrupt_middle_line_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("queue.jsonl");
    std::fs::write(
        &path,
        "{\"type\":\"delete\",\"id\":1}\nnot json\n{\"type\":\"delete\",\"id\":2}\n",
    )
    .unwrap();

    let result: Result<Vec<QueuedOperation>> = read_all(&path);
    assert!(result.is_err());
}

#[test]
fn write_all_replaces_content_and_leaves_no_temp_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("movies.jsonl");

    write_all(&path, &[Movie::new(1, "A"), Movie::new(2, "B")]).unwrap();
    write_all(&path, &[Movie::new(3, "C")]).unwrap();

    let movies: Vec<Movie> = read_all(&path).unwrap();
    assert_eq!(movies, vec![Movie::new(3, "C")]);
    assert!(!dir.path().join("movies.jsonl.tmp").exists());
}

#[test]
fn write_all_empty_truncates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("movies.jsonl");

    write_all(&path, &[Movie::new(1, "A")]).unwrap();
    write_all::<Movie>(&path, &[]).unwrap();

    let movies: Vec<Movie> = read_all(&path).unwrap();
    assert!(movies.is_empty());
}

#[test]
fn append_after_torn_line_starts_fresh_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("queue.jsonl");
    std::fs::write(&path, "{\"type\":\"delete\",\"id\":1}\n{\"type\":\"del").unwrap();

    append(&path, &QueuedOperation::delete(2)).unwrap();

    let ops: Vec<QueuedOperation> = read_all(&path).unwrap();
    assert_eq!(ops, vec![QueuedOperation::delete(1), QueuedOperation::delete(2)]);
}

#[test]
fn append_keeps_complete_record_missing_newline() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("queue.jsonl");
    std::fs::write(&path, "{\"type\":\"delete\",\"id\":1}").unwrap();

    append(&path, &QueuedOperation::delete(2)).unwrap();

    let ops: Vec<QueuedOperation> = read_all(&path).unwrap();
    assert_eq!(ops, vec![QueuedOperation::delete(1), QueuedOperation::delete(2)]);
}
