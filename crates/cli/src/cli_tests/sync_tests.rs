// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn test_status_sync_watch_take_no_args() {
    assert!(matches!(parse(&["marquee", "status"]).unwrap().command, Command::Status));
    assert!(matches!(parse(&["marquee", "sync"]).unwrap().command, Command::Sync));
    assert!(matches!(parse(&["marquee", "watch"]).unwrap().command, Command::Watch));
    assert!(parse(&["marquee", "sync", "--force"]).is_err());
}

#[test]
fn test_queue_format() {
    let cli = parse(&["marquee", "queue", "--format", "json"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Queue {
            format: OutputFormat::Json
        }
    ));
}
