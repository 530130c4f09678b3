// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use mq_core::QueuedOperation;

use crate::cli::OutputFormat;
use crate::colors;
use crate::display::{format_pending, format_queued_op};
use crate::error::Result;
use crate::sync::Remote;

use super::{print_lines, Session};

/// Shows the queue without touching the network.
pub fn run<R: Remote>(session: &Session<R>, format: OutputFormat) -> Result<()> {
    let ops = session.coordinator.pending()?;
    match format {
        OutputFormat::Text => print_lines(&render_text(&ops)),
        // One operation per line, as stored.
        OutputFormat::Json => {
            for op in &ops {
                println!("{}", serde_json::to_string(op)?);
            }
        }
    }
    Ok(())
}

pub(crate) fn render_text(ops: &[QueuedOperation]) -> Vec<String> {
    if ops.is_empty() {
        return vec![format_pending(0)];
    }
    let mut lines = vec![colors::header("Pending (replay order):")];
    lines.extend(
        ops.iter()
            .enumerate()
            .map(|(i, op)| format_queued_op(i + 1, op)),
    );
    lines.push(colors::context(&format_pending(ops.len())));
    lines
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
