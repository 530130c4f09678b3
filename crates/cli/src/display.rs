// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Plain-text rendering of movies, pages and queued operations.
//!
//! Everything here returns strings; callers decide where they go.

use mq_core::{Movie, MoviePage, MoviePatch, OpKind, QueuedOperation, RatingStats};

use crate::colors;

/// Titles longer than this are cut with an ellipsis in listings.
const TITLE_WIDTH: usize = 40;

/// Cut `text` to at most `width` characters, ending in `...` if cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// One listing row: id, title, genre and rating.
///
/// ```text
///     12  Heat                                      Crime      8.3
/// ```
pub fn format_movie_line(movie: &Movie) -> String {
    let genre = movie.genre_name().unwrap_or("-");
    format!(
        "{:>6}  {:<width$}  {:<10} {:>4.1}",
        movie.id,
        truncate(&movie.title, TITLE_WIDTH),
        genre,
        movie.rating,
        width = TITLE_WIDTH
    )
}

/// Full record, for confirmations after add and edit.
pub fn format_movie_details(movie: &Movie) -> Vec<String> {
    let mut lines = vec![format!("{} {}", colors::header(&format!("#{}", movie.id)), movie.title)];
    if let Some(genre) = movie.genre_name() {
        lines.push(format!("  genre:  {genre}"));
    }
    lines.push(format!("  rating: {:.1}", movie.rating));
    if !movie.description.is_empty() {
        lines.push(format!("  {}", movie.description));
    }
    lines
}

/// Total number of pages for a listing.
pub fn page_count(page: &MoviePage) -> u64 {
    let limit = u64::from(page.limit.max(1));
    page.total.div_ceil(limit).max(1)
}

/// `page 2 of 5 (93 movies)`
pub fn format_page_footer(page: &MoviePage) -> String {
    let noun = if page.total == 1 { "movie" } else { "movies" };
    format!(
        "page {} of {} ({} {noun})",
        page.page,
        page_count(page),
        page.total
    )
}

/// `ratings: highest 9.1, lowest 2.0, average 6.4`
pub fn format_stats(stats: &RatingStats) -> String {
    format!(
        "ratings: highest {:.1}, lowest {:.1}, average {:.1}",
        stats.highest, stats.lowest, stats.average
    )
}

/// Comma-separated summary of the fields a patch sets.
pub fn describe_patch(patch: &MoviePatch) -> String {
    let mut parts = Vec::new();
    if let Some(title) = &patch.title {
        parts.push(format!("title={title:?}"));
    }
    if let Some(description) = &patch.description {
        parts.push(format!("description={:?}", truncate(description, 24)));
    }
    if let Some(image) = &patch.image {
        parts.push(format!("image={image:?}"));
    }
    match &patch.genre {
        Some(Some(genre)) => parts.push(format!("genre={}", genre.name)),
        Some(None) => parts.push("genre=none".to_string()),
        None => {}
    }
    if let Some(rating) = patch.rating {
        parts.push(format!("rating={rating:.1}"));
    }
    parts.join(", ")
}

/// One queue entry, numbered from 1 in replay order.
///
/// ```text
///   1. add     #1718000000000  title="Heat", rating=8.3
///   2. delete  #12
/// ```
pub fn format_queued_op(position: usize, op: &QueuedOperation) -> String {
    let target = op.id.map(|id| format!("#{id}")).unwrap_or_else(|| "-".to_string());
    let mut line = format!("{position:>3}. {:<7} {target}", op.kind.to_string());
    if let Some(data) = op.data.as_ref().filter(|_| op.kind != OpKind::Delete) {
        let fields = describe_patch(data);
        if !fields.is_empty() {
            line.push_str("  ");
            line.push_str(&colors::context(&fields));
        }
    }
    line
}

/// `3 operations pending`
pub fn format_pending(count: usize) -> String {
    match count {
        0 => "no pending operations".to_string(),
        1 => "1 operation pending".to_string(),
        n => format!("{n} operations pending"),
    }
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
