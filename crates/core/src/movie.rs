// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Movie records and partial updates.
//!
//! `id` is the only identity key. Ratings live in `[0, 10]`, but clamping is
//! the writer's job: records read back from the server or the local cache are
//! kept exactly as stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a movie record (server-assigned or temporary).
pub type MovieId = i64;

/// Lowest allowed rating.
pub const MIN_RATING: f64 = 0.0;
/// Highest allowed rating.
pub const MAX_RATING: f64 = 10.0;

/// Title given to a locally created movie that arrived without one.
pub const DEFAULT_TITLE: &str = "Untitled Movie";
/// Image used for a locally created movie that arrived without one.
pub const DEFAULT_IMAGE: &str = "/default-movie.jpg";

/// A movie genre as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

impl Genre {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Genre { id, name: name.into() }
    }
}

/// A movie record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub genre: Option<Genre>,
    #[serde(default, deserialize_with = "deserialize_rating")]
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Movie {
    /// Creates a movie with the given id and title and empty remaining fields.
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Movie {
            id,
            title: title.into(),
            description: String::new(),
            image: String::new(),
            genre: None,
            rating: MIN_RATING,
            created_at: None,
        }
    }

    pub fn with_genre(mut self, genre: Genre) -> Self {
        self.genre = Some(genre);
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the name of the movie's genre, if it has one.
    pub fn genre_name(&self) -> Option<&str> {
        self.genre.as_ref().map(|g| g.name.as_str())
    }

    /// Shallow-merges `local` over `self`, keeping `self.id`.
    ///
    /// Every field of `local` wins, except `created_at` which only overrides
    /// when the local record actually carries one.
    pub fn overlay(&self, local: &Movie) -> Movie {
        Movie {
            id: self.id,
            title: local.title.clone(),
            description: local.description.clone(),
            image: local.image.clone(),
            genre: local.genre.clone(),
            rating: local.rating,
            created_at: local.created_at.or(self.created_at),
        }
    }
}

/// Clamps a rating into `[0, 10]`. NaN becomes 0.
pub fn clamp_rating(rating: f64) -> f64 {
    if rating.is_nan() {
        return MIN_RATING;
    }
    rating.clamp(MIN_RATING, MAX_RATING)
}

/// A partial movie used for creates and updates.
///
/// Absent fields are left untouched when the patch is applied. `genre` is
/// doubly optional so that an explicit `null` clears the genre.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoviePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub genre: Option<Option<Genre>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_rating"
    )]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl MoviePatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &MoviePatch::default()
    }

    /// Shallow-merges the present fields onto `movie`.
    pub fn apply_to(&self, movie: &mut Movie) {
        if let Some(title) = &self.title {
            movie.title = title.clone();
        }
        if let Some(description) = &self.description {
            movie.description = description.clone();
        }
        if let Some(image) = &self.image {
            movie.image = image.clone();
        }
        if let Some(genre) = &self.genre {
            movie.genre = genre.clone();
        }
        if let Some(rating) = self.rating {
            movie.rating = rating;
        }
        if let Some(created_at) = self.created_at {
            movie.created_at = Some(created_at);
        }
    }

    /// Materializes a new record with the given id.
    ///
    /// Missing or blank title and image fall back to [`DEFAULT_TITLE`] and
    /// [`DEFAULT_IMAGE`], and the rating is clamped.
    pub fn into_movie(self, id: MovieId) -> Movie {
        let title = self.title.filter(|t| !t.trim().is_empty());
        let image = self.image.filter(|i| !i.trim().is_empty());
        Movie {
            id,
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            description: self.description.unwrap_or_default(),
            image: image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            genre: self.genre.flatten(),
            rating: clamp_rating(self.rating.unwrap_or(MIN_RATING)),
            created_at: self.created_at,
        }
    }

    /// Returns a copy with the rating (if any) clamped into `[0, 10]`.
    pub fn clamped(mut self) -> Self {
        self.rating = self.rating.map(clamp_rating);
        self
    }
}

/// Distinguishes a present `null` from an absent field.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Ratings arrive as numbers from clients but as decimal strings from the
/// server's `decimal(3,1)` column.
#[derive(Deserialize)]
#[serde(untagged)]
enum RatingRepr {
    Number(f64),
    Text(String),
}

impl RatingRepr {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            RatingRepr::Number(n) => Ok(n),
            RatingRepr::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid rating '{s}'"))),
        }
    }
}

fn deserialize_rating<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RatingRepr>::deserialize(deserializer)? {
        Some(repr) => repr.into_f64(),
        None => Ok(MIN_RATING),
    }
}

fn deserialize_optional_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RatingRepr>::deserialize(deserializer)?
        .map(RatingRepr::into_f64)
        .transpose()
}

#[cfg(test)]
#[path = "movie_tests.rs"]
mod tests;
