// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use mq_core::MovieId;

use crate::cli::MovieFields;
use crate::error::{Error, Result};
use crate::sync::Remote;

use super::{print_lines, report_outcome, Session};

pub async fn run<R: Remote>(session: &Session<R>, id: MovieId, fields: MovieFields) -> Result<()> {
    let patch = fields.into_patch();
    if patch.is_empty() {
        return Err(Error::NothingToEdit);
    }

    session.connect().await?;
    let outcome = session.coordinator.update_movie(id, patch).await?;
    print_lines(&report_outcome("updated", Some(id), &outcome));
    Ok(())
}

#[cfg(test)]
#[path = "edit_tests.rs"]
mod tests;
