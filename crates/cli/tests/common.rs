// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// Nothing listens on the discard port, so every call is refused.
pub const UNREACHABLE_BACKEND: &str = "http://127.0.0.1:9";

/// A `marquee` command isolated from the user's config and state, pointed
/// at a backend that refuses connections.
pub fn marquee(state: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("marquee");
    cmd.env_clear()
        .env("NO_COLOR", "1")
        .env("HOME", state.path())
        .env("XDG_CONFIG_HOME", state.path().join("config"))
        .env("MARQUEE_BACKEND_URL", UNREACHABLE_BACKEND)
        .env("MARQUEE_STATE_DIR", state.path().join("state"));
    cmd
}

/// Adds a movie while offline and returns its temporary id.
pub fn add_offline(state: &TempDir, title: &str) -> String {
    let output = marquee(state)
        .args(["add", "--title", title])
        .output()
        .unwrap();
    assert!(output.status.success());

    String::from_utf8_lossy(&output.stdout)
        .split_whitespace()
        .find(|s| s.starts_with('#'))
        .unwrap()
        .trim_start_matches('#')
        .to_string()
}
