// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Merging the server collection with locally held records.
//!
//! Merge rules:
//! - Start from the server collection, in server order
//! - Local record with an id the server does not know: appended (not yet synced)
//! - Local record with an id the server knows: overlaid on the server record
//!   at the server's position, local fields winning
//!
//! The id is the only identity key, so every id appears exactly once in the
//! result. There is no timestamp comparison: a local edit always beats the
//! server, and two clients editing the same movie are not reconciled field
//! by field.

use std::collections::HashMap;

use crate::movie::{Movie, MovieId};

/// Merges `local` over `server`.
pub fn merge(server: &[Movie], local: &[Movie]) -> Vec<Movie> {
    let mut merged: Vec<Movie> = Vec::with_capacity(server.len() + local.len());
    let mut index: HashMap<MovieId, usize> = HashMap::with_capacity(server.len() + local.len());

    for movie in server {
        if index.contains_key(&movie.id) {
            continue;
        }
        index.insert(movie.id, merged.len());
        merged.push(movie.clone());
    }
    let server_len = merged.len();

    for movie in local {
        match index.get(&movie.id) {
            Some(&i) if i < server_len => {
                merged[i] = merged[i].overlay(movie);
            }
            Some(&i) => {
                // Repeated local id: the later record wins.
                merged[i] = movie.clone();
            }
            None => {
                index.insert(movie.id, merged.len());
                merged.push(movie.clone());
            }
        }
    }

    merged
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
