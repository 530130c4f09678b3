// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Listing queries and their local evaluation.
//!
//! The server answers `GET /movies?page&limit&genre&sort` with a
//! [`MoviePage`]. While disconnected the same query is evaluated against the
//! local cache with [`MovieQuery::run_local`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::movie::Movie;

/// Default page size, matching the server's.
pub const DEFAULT_LIMIT: u32 = 20;

/// Sort order accepted by the movie listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    TitleAsc,
    TitleDesc,
    RatingAsc,
    RatingDesc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::TitleAsc => "title-asc",
            SortOrder::TitleDesc => "title-desc",
            SortOrder::RatingAsc => "rating-asc",
            SortOrder::RatingDesc => "rating-desc",
        }
    }

    fn compare(&self, a: &Movie, b: &Movie) -> Ordering {
        match self {
            SortOrder::TitleAsc => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortOrder::TitleDesc => b.title.to_lowercase().cmp(&a.title.to_lowercase()),
            SortOrder::RatingAsc => a.rating.total_cmp(&b.rating),
            SortOrder::RatingDesc => b.rating.total_cmp(&a.rating),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "title-asc" => Ok(SortOrder::TitleAsc),
            "title-desc" => Ok(SortOrder::TitleDesc),
            "rating-asc" => Ok(SortOrder::RatingAsc),
            "rating-desc" => Ok(SortOrder::RatingDesc),
            other => Err(Error::InvalidSortOrder(other.to_string())),
        }
    }
}

/// Parameters of a movie listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieQuery {
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,
    pub genre: Option<String>,
    pub sort: Option<SortOrder>,
}

impl Default for MovieQuery {
    fn default() -> Self {
        MovieQuery {
            page: 1,
            limit: DEFAULT_LIMIT,
            genre: None,
            sort: None,
        }
    }
}

impl MovieQuery {
    pub fn page(page: u32, limit: u32) -> Self {
        MovieQuery {
            page: page.max(1),
            limit: limit.max(1),
            ..Default::default()
        }
    }

    /// Query string pairs for the HTTP request.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        if let Some(genre) = &self.genre {
            pairs.push(("genre", genre.clone()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_string()));
        }
        pairs
    }

    /// Evaluates the query against a local collection.
    pub fn run_local(&self, movies: &[Movie]) -> MoviePage {
        let mut selected: Vec<Movie> = match &self.genre {
            Some(genre) => filter_genre(movies, genre),
            None => movies.to_vec(),
        };
        if let Some(sort) = self.sort {
            sort_movies(&mut selected, sort);
        }
        let total = selected.len() as u64;
        MoviePage {
            data: paginate(&selected, self.page, self.limit),
            total,
            page: self.page,
            limit: self.limit,
        }
    }
}

/// One page of a movie listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviePage {
    #[serde(default)]
    pub data: Vec<Movie>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn first_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl MoviePage {
    /// Returns true if later pages exist.
    pub fn has_more(&self) -> bool {
        self.total > u64::from(self.page) * u64::from(self.limit)
    }
}

/// Stable sort by the given order.
pub fn sort_movies(movies: &mut [Movie], order: SortOrder) {
    movies.sort_by(|a, b| order.compare(a, b));
}

/// Movies whose genre name matches `genre` (case-insensitive).
pub fn filter_genre(movies: &[Movie], genre: &str) -> Vec<Movie> {
    movies
        .iter()
        .filter(|m| m.genre_name().is_some_and(|g| g.eq_ignore_ascii_case(genre)))
        .cloned()
        .collect()
}

/// Returns the 1-based `page` of size `limit`.
pub fn paginate(movies: &[Movie], page: u32, limit: u32) -> Vec<Movie> {
    let limit = limit.max(1) as usize;
    let start = (page.max(1) as usize - 1).saturating_mul(limit);
    movies.iter().skip(start).take(limit).cloned().collect()
}

/// Highest, lowest and average rating of a collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingStats {
    pub highest: f64,
    pub lowest: f64,
    /// Rounded to one decimal.
    pub average: f64,
}

impl RatingStats {
    /// Returns `None` for an empty collection.
    pub fn of(movies: &[Movie]) -> Option<Self> {
        if movies.is_empty() {
            return None;
        }
        let mut highest = f64::MIN;
        let mut lowest = f64::MAX;
        let mut sum = 0.0;
        for movie in movies {
            highest = highest.max(movie.rating);
            lowest = lowest.min(movie.rating);
            sum += movie.rating;
        }
        let average = (sum / movies.len() as f64 * 10.0).round() / 10.0;
        Some(RatingStats {
            highest,
            lowest,
            average,
        })
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
