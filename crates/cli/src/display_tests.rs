// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use mq_core::Genre;
use yare::parameterized;

fn page(total: u64, page: u32, limit: u32) -> MoviePage {
    MoviePage {
        data: Vec::new(),
        total,
        page,
        limit,
    }
}

#[parameterized(
    short = { "Heat", 10, "Heat" },
    exact = { "Heat", 4, "Heat" },
    cut = { "The Good, the Bad and the Ugly", 10, "The Goo..." },
    multibyte = { "Amélie Poulain", 8, "Améli..." },
)]
fn test_truncate(input: &str, width: usize, expected: &str) {
    assert_eq!(truncate(input, width), expected);
}

#[test]
fn test_movie_line_columns() {
    let movie = Movie::new(12, "Heat")
        .with_genre(Genre::new(3, "Crime"))
        .with_rating(8.25);

    let line = format_movie_line(&movie);

    assert!(line.starts_with("    12  Heat "), "{line}");
    assert!(line.contains("Crime"));
    assert!(line.ends_with(" 8.2") || line.ends_with(" 8.3"), "{line}");
}

#[test]
fn test_movie_line_without_genre() {
    let line = format_movie_line(&Movie::new(1, "Untitled Movie"));
    assert!(line.contains("  -  "), "{line}");
}

#[parameterized(
    empty = { 0, 1, 20, "page 1 of 1 (0 movies)" },
    single = { 1, 1, 20, "page 1 of 1 (1 movie)" },
    partial_last = { 41, 3, 20, "page 3 of 3 (41 movies)" },
    exact_fit = { 40, 2, 20, "page 2 of 2 (40 movies)" },
)]
fn test_page_footer(total: u64, number: u32, limit: u32, expected: &str) {
    assert_eq!(format_page_footer(&page(total, number, limit)), expected);
}

#[test]
fn test_stats_line() {
    let stats = RatingStats {
        highest: 9.0,
        lowest: 2.5,
        average: 6.0,
    };
    assert_eq!(
        format_stats(&stats),
        "ratings: highest 9.0, lowest 2.5, average 6.0"
    );
}

#[test]
fn test_describe_patch_lists_set_fields() {
    let patch = MoviePatch {
        title: Some("Heat".into()),
        genre: Some(None),
        rating: Some(8.0),
        ..MoviePatch::default()
    };
    assert_eq!(describe_patch(&patch), "title=\"Heat\", genre=none, rating=8.0");
    assert_eq!(describe_patch(&MoviePatch::default()), "");
}

#[test]
fn test_queued_op_line() {
    let delete = QueuedOperation::delete(12);
    assert_eq!(format_queued_op(2, &delete), "  2. delete  #12");

    let add = QueuedOperation::add(Some(77), MoviePatch::default());
    assert_eq!(format_queued_op(1, &add), "  1. add     #77");
}

#[parameterized(
    none = { 0, "no pending operations" },
    one = { 1, "1 operation pending" },
    many = { 4, "4 operations pending" },
)]
fn test_pending(count: usize, expected: &str) {
    assert_eq!(format_pending(count), expected);
}
