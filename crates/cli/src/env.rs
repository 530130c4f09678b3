// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the client are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns the value of `MARQUEE_BACKEND_URL` if set and non-empty.
pub fn backend_url() -> Option<String> {
    non_empty(vars::MARQUEE_BACKEND_URL)
}

/// Returns the value of `MARQUEE_TOKEN` if set and non-empty.
pub fn token() -> Option<String> {
    non_empty(vars::MARQUEE_TOKEN)
}

/// Returns the value of `MARQUEE_STATE_DIR` if set.
pub fn state_dir() -> Option<PathBuf> {
    non_empty(vars::MARQUEE_STATE_DIR).map(PathBuf::from)
}

/// Returns the value of `XDG_STATE_HOME` if set.
pub fn xdg_state_home() -> Option<PathBuf> {
    non_empty(vars::XDG_STATE_HOME).map(PathBuf::from)
}

/// Returns `true` if `NO_COLOR=1`.
pub fn no_color() -> bool {
    std::env::var(vars::NO_COLOR).is_ok_and(|v| v == "1")
}

/// Returns `true` if `COLOR=1`.
pub fn force_color() -> bool {
    std::env::var(vars::COLOR).is_ok_and(|v| v == "1")
}

/// Returns `true` if `RUST_LOG` is set, so it should win over defaults.
pub fn log_filter_set() -> bool {
    std::env::var(vars::RUST_LOG).is_ok()
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
