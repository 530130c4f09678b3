// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON Lines file utilities.
//!
//! Each record is one JSON line. Appends are fsynced; full rewrites go
//! through a sibling temp file and a rename so a crash leaves either the old
//! or the new content, never a mix.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

/// Appends a record with fsync.
///
/// A torn final line left by an interrupted append is cut off first so the
/// new record starts on its own line. A complete final record that only
/// lacks its newline is kept.
pub fn append<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)?;
    discard_torn_tail(&mut file)?;

    let json = serde_json::to_string(record)?;
    writeln!(file, "{json}")?;
    file.sync_all()?;

    Ok(())
}

/// Reads all records.
///
/// Blank lines are skipped and a missing file reads as empty. A final line
/// without its terminating newline is an append that never completed and is
/// ignored; a malformed line anywhere else is an error.
pub fn read_all<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let torn_tail = !content.is_empty() && !content.ends_with('\n');
    let lines: Vec<&str> = content.lines().collect();
    let mut records = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(line) {
            Ok(record) => records.push(record),
            Err(_) if torn_tail && i + 1 == lines.len() => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(records)
}

/// Replaces the file content with `records`.
pub fn write_all<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let tmp = temp_path(path);
    {
        let mut file = File::create(&tmp)?;
        for record in records {
            let json = serde_json::to_string(record)?;
            writeln!(file, "{json}")?;
        }
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;

    Ok(())
}

fn discard_torn_tail(file: &mut File) -> Result<()> {
    if file.metadata()?.len() == 0 {
        return Ok(());
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    if last[0] == b'\n' {
        return Ok(());
    }

    let mut content = Vec::new();
    file.seek(SeekFrom::Start(0))?;
    file.read_to_end(&mut content)?;
    let keep = content.iter().rposition(|b| *b == b'\n').map_or(0, |i| i + 1);
    if serde_json::from_slice::<serde_json::Value>(&content[keep..]).is_ok() {
        // Complete record, only the newline is missing.
        file.write_all(b"\n")?;
    } else {
        file.set_len(keep as u64)?;
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
#[path = "jsonl_tests.rs"]
mod tests;
