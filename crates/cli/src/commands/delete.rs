// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use mq_core::MovieId;

use crate::error::Result;
use crate::sync::Remote;

use super::{print_lines, report_outcome, Session};

pub async fn run<R: Remote>(session: &Session<R>, id: MovieId) -> Result<()> {
    session.connect().await?;
    let outcome = session.coordinator.delete_movie(id).await?;
    print_lines(&report_outcome("deleted", Some(id), &outcome));
    Ok(())
}

#[cfg(test)]
#[path = "delete_tests.rs"]
mod tests;
