// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.

use clap::Args;
use mq_core::{Genre, MoviePatch};

/// Genre value that clears the genre on edit.
const NO_GENRE: &str = "none";

/// Parse a string that must not be empty or whitespace-only.
pub fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Movie fields shared by `add` and `edit`.
#[derive(Args, Clone, Debug, Default)]
pub struct MovieFields {
    /// Title
    #[arg(long, value_parser = non_empty_string)]
    pub title: Option<String>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,

    /// Image path or URL
    #[arg(long)]
    pub image: Option<String>,

    /// Genre name ("none" clears it)
    #[arg(long, value_parser = non_empty_string)]
    pub genre: Option<String>,

    /// Rating from 0 to 10 (out-of-range values are clamped)
    #[arg(long, allow_negative_numbers = true)]
    pub rating: Option<f64>,
}

impl MovieFields {
    /// The patch these flags describe.
    ///
    /// Genres are sent by name; the server resolves the id.
    pub fn into_patch(self) -> MoviePatch {
        let genre = self.genre.map(|name| {
            if name.eq_ignore_ascii_case(NO_GENRE) {
                None
            } else {
                Some(Genre::new(0, name.trim()))
            }
        });

        MoviePatch {
            title: self.title.map(|t| t.trim().to_string()),
            description: self.description,
            image: self.image,
            genre,
            rating: self.rating,
            created_at: None,
        }
        .clamped()
    }
}
