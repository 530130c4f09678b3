// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::cli::MovieFields;
use crate::error::Result;
use crate::sync::Remote;

use super::{print_lines, report_outcome, Session};

/// Creates a movie; unset fields take the server's defaults.
pub async fn run<R: Remote>(session: &Session<R>, fields: MovieFields) -> Result<()> {
    let patch = fields.into_patch();
    session.connect().await?;
    let outcome = session.coordinator.add_movie(patch).await?;
    print_lines(&report_outcome("added", None, &outcome));
    Ok(())
}

#[cfg(test)]
#[path = "add_tests.rs"]
mod tests;
